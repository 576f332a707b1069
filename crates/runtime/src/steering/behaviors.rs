//! Individual steering contributions.
//!
//! Each function returns a desired-velocity delta: the velocity the agent
//! would like to have minus the one it has. Degenerate geometry (coincident
//! points, zero relative speed) falls back to zero vectors instead of
//! dividing by zero.

use game_core::math::{normalize_or_zero, safe_inv};
use game_core::{AiConfig, FlowField, Position};
use glam::Vec2;

pub fn seek(position: Vec2, velocity: Vec2, target: Vec2, max_speed: f32) -> Vec2 {
    normalize_or_zero(target - position) * max_speed - velocity
}

pub fn flee(position: Vec2, velocity: Vec2, threat: Vec2, max_speed: f32) -> Vec2 {
    normalize_or_zero(position - threat) * max_speed - velocity
}

/// Seek toward where the target will be after [`AiConfig::PURSUE_HORIZON`].
pub fn pursue(
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    target_velocity: Vec2,
    max_speed: f32,
) -> Vec2 {
    let predicted = target + target_velocity * AiConfig::PURSUE_HORIZON;
    seek(position, velocity, predicted, max_speed)
}

/// Prediction horizon for [`evade`]: the time of closest approach scaled by
/// [`AiConfig::EVADE_INTERCEPT_SCALE`] and clamped to the horizon bounds.
///
/// Diverging or relatively motionless pairs clamp to the minimum horizon.
pub fn evade_horizon(position: Vec2, velocity: Vec2, threat: Vec2, threat_velocity: Vec2) -> f32 {
    let offset = position - threat;
    let relative_velocity = velocity - threat_velocity;
    let closest_approach = -offset.dot(relative_velocity) * safe_inv(relative_velocity.length_squared());
    (closest_approach * AiConfig::EVADE_INTERCEPT_SCALE)
        .min(AiConfig::EVADE_MAX_HORIZON)
        .max(AiConfig::EVADE_MIN_HORIZON)
}

/// Flee from where the threat will be at the predicted closest approach.
pub fn evade(
    position: Vec2,
    velocity: Vec2,
    threat: Vec2,
    threat_velocity: Vec2,
    max_speed: f32,
) -> Vec2 {
    let horizon = evade_horizon(position, velocity, threat, threat_velocity);
    flee(
        position,
        velocity,
        threat + threat_velocity * horizon,
        max_speed,
    )
}

/// Inverse-square push away from every neighbour closer than `threshold`.
///
/// Each close neighbour adds its own desired-velocity delta, so crowding
/// strengthens the push.
pub fn separation(
    position: Vec2,
    velocity: Vec2,
    neighbors: impl IntoIterator<Item = Vec2>,
    threshold: f32,
    force: f32,
    max_speed: f32,
) -> Vec2 {
    neighbors
        .into_iter()
        .filter_map(|other| {
            let offset = position - other;
            let dist_sq = offset.length_squared();
            (dist_sq <= threshold * threshold).then(|| {
                offset * safe_inv(dist_sq) * force * max_speed * threshold - velocity
            })
        })
        .sum()
}

/// Adds a fraction of each neighbour's velocity within
/// [`AiConfig::ALIGNMENT_RADIUS`].
pub fn alignment(
    position: Vec2,
    neighbors: impl IntoIterator<Item = (Vec2, Vec2)>,
) -> Vec2 {
    let radius_sq = AiConfig::ALIGNMENT_RADIUS * AiConfig::ALIGNMENT_RADIUS;
    neighbors
        .into_iter()
        .filter(|(other, _)| other.distance_squared(position) <= radius_sq)
        .map(|(_, other_velocity)| other_velocity * AiConfig::ALIGNMENT_WEIGHT)
        .sum()
}

/// Steers along the flow stored at the tile the agent will reach after
/// [`AiConfig::FLOW_LOOKAHEAD`]. `None` when that tile is off the grid.
pub fn flow_follow(
    position: Vec2,
    velocity: Vec2,
    flow: &FlowField,
    max_speed: f32,
) -> Option<Vec2> {
    let ahead = position + velocity * AiConfig::FLOW_LOOKAHEAD;
    let direction = flow.at(Position::from_vec2(ahead))?;
    Some(normalize_or_zero(direction) * max_speed - velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Grid, ScalarField};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn seek_and_flee_are_opposite_from_rest() {
        let p = Vec2::new(1.0, 1.0);
        let t = Vec2::new(4.0, 5.0);
        let towards = seek(p, Vec2::ZERO, t, 5.0);
        assert!(approx(towards, Vec2::new(3.0, 4.0)));
        assert!(approx(flee(p, Vec2::ZERO, t, 5.0), -towards));
    }

    #[test]
    fn seek_subtracts_current_velocity() {
        let v = Vec2::new(0.0, 2.0);
        let out = seek(Vec2::ZERO, v, Vec2::new(10.0, 0.0), 5.0);
        assert!(approx(out, Vec2::new(5.0, -2.0)));
    }

    #[test]
    fn coincident_points_do_not_produce_nan() {
        let out = seek(Vec2::ONE, Vec2::ZERO, Vec2::ONE, 5.0);
        assert_eq!(out, Vec2::ZERO);
        let horizon = evade_horizon(Vec2::ONE, Vec2::ZERO, Vec2::ONE, Vec2::ZERO);
        assert_eq!(horizon, AiConfig::EVADE_MIN_HORIZON);
    }

    #[test]
    fn pursue_leads_a_moving_target() {
        // target moving right, pursuer below it: the lead point is ahead of the target
        let out = pursue(
            Vec2::new(0.0, 10.0),
            Vec2::ZERO,
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            5.0,
        );
        assert!(out.x > 0.0);
        assert!(out.y < 0.0);
    }

    #[test]
    fn evade_horizon_tracks_closest_approach() {
        // head-on at relative speed 10 from distance 20: contact in 2s
        let mid = evade_horizon(
            Vec2::new(20.0, 0.0),
            Vec2::new(-5.0, 0.0),
            Vec2::ZERO,
            Vec2::new(5.0, 0.0),
        );
        assert!((mid - 1.8).abs() < 1e-5);

        // same geometry from 100 away clamps to the maximum
        let far = evade_horizon(
            Vec2::new(100.0, 0.0),
            Vec2::new(-5.0, 0.0),
            Vec2::ZERO,
            Vec2::new(5.0, 0.0),
        );
        assert_eq!(far, AiConfig::EVADE_MAX_HORIZON);

        // diverging pairs clamp to the minimum
        let away = evade_horizon(
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::ZERO,
            Vec2::ZERO,
        );
        assert_eq!(away, AiConfig::EVADE_MIN_HORIZON);
    }

    #[test]
    fn evade_flees_the_predicted_point() {
        // threat passing above, moving right: predicted point is ahead of it
        let out = evade(
            Vec2::new(0.0, 0.0),
            Vec2::ZERO,
            Vec2::new(-10.0, -1.0),
            Vec2::new(5.0, 0.0),
            5.0,
        );
        assert!(out.y > 0.0);
    }

    #[test]
    fn separation_ignores_distant_neighbours() {
        let out = separation(
            Vec2::ZERO,
            Vec2::ZERO,
            [Vec2::new(100.0, 0.0)],
            70.0,
            1.0,
            5.0,
        );
        assert_eq!(out, Vec2::ZERO);
    }

    #[test]
    fn alignment_weights_neighbour_velocity() {
        let out = alignment(
            Vec2::ZERO,
            [
                (Vec2::new(10.0, 0.0), Vec2::new(0.0, 1.0)),
                (Vec2::new(500.0, 0.0), Vec2::new(9.0, 9.0)),
            ],
        );
        assert!(approx(out, Vec2::new(0.0, 0.8)));
    }

    #[test]
    fn flow_follow_reads_the_tile_ahead() {
        let grid = Grid::new(5, 1).unwrap();
        let field = ScalarField::generate(&grid, [Position::new(0, 0)]);
        let flow = FlowField::extract(&field, 2);

        let out = flow_follow(Vec2::new(3.0, 0.0), Vec2::ZERO, &flow, 5.0).unwrap();
        assert!(approx(out, Vec2::new(-5.0, 0.0)));

        assert!(flow_follow(Vec2::new(9.0, 0.0), Vec2::ZERO, &flow, 5.0).is_none());
    }
}
