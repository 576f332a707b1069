//! Numerically guarded vector helpers.

use glam::Vec2;

use crate::config::AiConfig;

/// `1 / x`, or zero when `|x|` is below [`AiConfig::EPSILON`].
#[inline]
pub fn safe_inv(x: f32) -> f32 {
    if x.abs() < AiConfig::EPSILON {
        0.0
    } else {
        1.0 / x
    }
}

/// Unit vector in the direction of `v`, or zero for degenerate input.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < AiConfig::EPSILON || !len.is_finite() {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Scales `v` down so its length does not exceed `max`.
#[inline]
pub fn truncate(v: Vec2, max: f32) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq > max * max && len_sq > 0.0 {
        v * (max / len_sq.sqrt())
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_degenerate_inputs() {
        assert_eq!(safe_inv(0.0), 0.0);
        assert_eq!(safe_inv(4.0), 0.25);
        assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(normalize_or_zero(Vec2::new(0.0, 3.0)), Vec2::Y);
    }

    #[test]
    fn truncate_caps_length() {
        let v = truncate(Vec2::new(3.0, 4.0), 2.5);
        assert!((v.length() - 2.5).abs() < 1e-5);
        assert_eq!(truncate(Vec2::new(1.0, 0.0), 2.0), Vec2::new(1.0, 0.0));
    }
}
