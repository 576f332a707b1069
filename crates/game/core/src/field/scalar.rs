use tracing::{debug, warn};

use super::is_valid;
use crate::config::AiConfig;
use crate::error::GridError;
use crate::grid::{GridDimensions, GridOracle};
use crate::types::Position;

/// Per-tile distance-like values in row-major order.
///
/// Unreached and blocked tiles hold [`AiConfig::INVALID_TILE_VALUE`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarField {
    dimensions: GridDimensions,
    values: Vec<f32>,
}

impl ScalarField {
    /// A field with every tile set to the sentinel.
    pub fn invalid(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            values: vec![AiConfig::INVALID_TILE_VALUE; dimensions.area()],
        }
    }

    pub fn from_values(dimensions: GridDimensions, values: Vec<f32>) -> Result<Self, GridError> {
        if values.len() != dimensions.area() {
            return Err(GridError::SizeMismatch {
                expected: dimensions.area(),
                found: values.len(),
            });
        }
        Ok(Self { dimensions, values })
    }

    /// Hop-count field from `sources` over the walkable tiles of `grid`.
    ///
    /// Sources that are out of bounds or blocked are ignored. With no
    /// usable source the result is all-sentinel.
    pub fn generate<G, I>(grid: &G, sources: I) -> Self
    where
        G: GridOracle + ?Sized,
        I: IntoIterator<Item = Position>,
    {
        let dimensions = grid.dimensions();
        let mut field = Self::invalid(dimensions);
        let mut seeded = 0usize;

        for source in sources {
            match dimensions.index(source) {
                Some(index) if grid.is_walkable(source) => {
                    field.values[index] = 0.0;
                    seeded += 1;
                }
                _ => warn!(%source, "ignoring field source on a blocked or out-of-bounds tile"),
            }
        }

        if seeded > 0 {
            field.relax(grid);
        }
        field
    }

    /// Runs relaxation passes until a full pass changes nothing.
    ///
    /// Each walkable tile takes the minimum of its in-bounds walkable
    /// neighbours plus one step when that is strictly lower than its current
    /// value. Returns the number of tile updates performed, so relaxing a
    /// converged field returns zero.
    pub fn relax<G: GridOracle + ?Sized>(&mut self, grid: &G) -> usize {
        let dimensions = self.dimensions;
        let mut updates = 0usize;
        let mut passes = 0usize;

        loop {
            passes += 1;
            let mut changed = false;

            for index in 0..self.values.len() {
                let position = dimensions.position(index);
                if !grid.is_walkable(position) {
                    continue;
                }

                let current = self.values[index];
                let min_neighbor = position
                    .orthogonal()
                    .into_iter()
                    .filter(|n| grid.is_walkable(*n))
                    .filter_map(|n| dimensions.index(n))
                    .map(|i| self.values[i])
                    .fold(AiConfig::INVALID_TILE_VALUE, f32::min);

                if min_neighbor < current - AiConfig::RELAX_STEP {
                    self.values[index] = min_neighbor + AiConfig::RELAX_STEP;
                    updates += 1;
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        debug!(passes, updates, "scalar field relaxed");
        updates
    }

    /// Turns an approach field into a flee field.
    ///
    /// Every reached value is multiplied by `multiplier` (negative for
    /// repulsion) and the result is relaxed again so the field stays
    /// distance-like around its new minima.
    pub fn flee<G: GridOracle + ?Sized>(approach: &ScalarField, grid: &G, multiplier: f32) -> Self {
        let mut field = approach.clone();
        field.scale_valid(multiplier);
        field.relax(grid);
        field
    }

    /// Multiplies every reached value in place, leaving sentinels untouched.
    pub fn scale_valid(&mut self, multiplier: f32) {
        for value in self.values.iter_mut().filter(|v| is_valid(**v)) {
            *value *= multiplier;
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at an in-bounds position.
    pub fn get(&self, position: Position) -> Option<f32> {
        self.dimensions
            .index(position)
            .map(|index| self.values[index])
    }

    pub fn value_at(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .copied()
            .unwrap_or(AiConfig::INVALID_TILE_VALUE)
    }

    pub fn is_reached(&self, position: Position) -> bool {
        self.get(position).is_some_and(is_valid)
    }

    /// Smallest and largest reached values, if any tile was reached.
    pub fn valid_range(&self) -> Option<(f32, f32)> {
        self.values
            .iter()
            .copied()
            .filter(|v| is_valid(*v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
