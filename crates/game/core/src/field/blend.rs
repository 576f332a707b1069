use super::{ScalarField, is_valid};
use crate::config::AiConfig;
use crate::error::GridError;

/// One weighted input of a [`FieldBlend`].
#[derive(Clone, Copy, Debug)]
pub struct BlendComponent<'a> {
    pub field: &'a ScalarField,
    pub multiplier: f32,
    pub power: f32,
}

impl BlendComponent<'_> {
    fn contribution(&self, index: usize) -> f32 {
        let value = self.field.value_at(index);
        if is_valid(value) {
            (value * self.multiplier).powf(self.power)
        } else {
            AiConfig::INVALID_TILE_VALUE
        }
    }
}

/// Weighted per-tile sum of several scalar fields.
///
/// A reached value `v` contributes `(v * multiplier).powf(power)`; a sentinel
/// contributes the sentinel itself, so any unreached component keeps the
/// blended tile unreached. Negative bases with fractional powers produce
/// NaN, exactly as `powf` does.
#[derive(Clone, Debug)]
pub struct FieldBlend<'a> {
    components: Vec<BlendComponent<'a>>,
}

impl<'a> FieldBlend<'a> {
    pub fn new(field: &'a ScalarField, multiplier: f32, power: f32) -> Self {
        Self {
            components: vec![BlendComponent {
                field,
                multiplier,
                power,
            }],
        }
    }

    #[must_use]
    pub fn with(mut self, field: &'a ScalarField, multiplier: f32, power: f32) -> Self {
        self.components.push(BlendComponent {
            field,
            multiplier,
            power,
        });
        self
    }

    pub fn components(&self) -> &[BlendComponent<'a>] {
        &self.components
    }

    /// Combines the components into a new field.
    pub fn evaluate(&self) -> Result<ScalarField, GridError> {
        let dimensions = self.components[0].field.dimensions();
        if let Some(other) = self
            .components
            .iter()
            .find(|c| c.field.dimensions() != dimensions)
        {
            return Err(GridError::SizeMismatch {
                expected: dimensions.area(),
                found: other.field.dimensions().area(),
            });
        }

        let values = (0..dimensions.area())
            .map(|index| {
                self.components
                    .iter()
                    .map(|component| component.contribution(index))
                    .sum()
            })
            .collect();
        ScalarField::from_values(dimensions, values)
    }
}
