//! Influence maps over the tile grid.
//!
//! A [`ScalarField`] stores a distance-like cost per tile, relaxed outward
//! from a set of source tiles. A [`FlowField`] caches a short greedy descent
//! over a scalar field so many agents can share one downhill lookup.
//! [`FieldBlend`] combines several scalar fields into one.
//!
//! Fields are values: they are rebuilt from scratch when their sources
//! change and replaced wholesale, never patched in place by readers.

mod blend;
mod flow;
mod scalar;

pub use blend::{BlendComponent, FieldBlend};
pub use flow::FlowField;
pub use scalar::ScalarField;

use crate::config::AiConfig;

/// Whether a field value denotes a reached tile.
#[inline]
pub fn is_valid(value: f32) -> bool {
    value < AiConfig::INVALID_TILE_VALUE
}
