use glam::Vec2;

use super::{ScalarField, is_valid};
use crate::grid::GridDimensions;
use crate::types::Position;

/// Per-tile displacement toward lower values of a scalar field.
///
/// Each entry is the net offset (in tiles) reached by a bounded greedy
/// descent, not a unit vector. Callers normalize as needed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowField {
    dimensions: GridDimensions,
    vectors: Vec<Vec2>,
}

impl FlowField {
    /// Simulates `step_count` greedy descents from every reached tile.
    ///
    /// Each step moves to the in-bounds orthogonal neighbour with the lowest
    /// value strictly below the running minimum, checking left, right, up,
    /// down so ties keep the first direction. A step with no improvement
    /// ends the descent early. Unreached tiles get the zero vector.
    pub fn extract(field: &ScalarField, step_count: u32) -> Self {
        let dimensions = field.dimensions();
        let vectors = (0..dimensions.area())
            .map(|index| {
                if !is_valid(field.value_at(index)) {
                    return Vec2::ZERO;
                }
                let origin = dimensions.position(index);
                let target = descend(field, origin, step_count);
                Vec2::new(
                    (target.x - origin.x) as f32,
                    (target.y - origin.y) as f32,
                )
            })
            .collect();

        Self {
            dimensions,
            vectors,
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Displacement stored for an in-bounds tile.
    pub fn at(&self, position: Position) -> Option<Vec2> {
        self.dimensions
            .index(position)
            .map(|index| self.vectors[index])
    }

    pub fn vectors(&self) -> &[Vec2] {
        &self.vectors
    }
}

fn descend(field: &ScalarField, origin: Position, step_count: u32) -> Position {
    let mut current = origin;
    let mut running_min = field.get(origin).unwrap_or(f32::INFINITY);

    for _ in 0..step_count {
        let mut next = None;
        for neighbor in current.orthogonal() {
            if let Some(value) = field.get(neighbor)
                && value < running_min
            {
                running_min = value;
                next = Some(neighbor);
            }
        }
        match next {
            Some(position) => current = position,
            None => break,
        }
    }
    current
}
