//! Formulation request validation
//!
//! One engine invocation bundled for transport. The engine itself does not
//! re-validate raw measurements; presentation layers (CLI, FFI, UI) call
//! [`FormulationRequest::validate`] before handing the request over.

use crate::types::{NutrientProfile, PigCategory, WeightStage};
use serde::{Deserialize, Serialize};

/// Inputs for one formulation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulationRequest {
    /// Pig category selecting the target row
    pub category: PigCategory,
    /// Growth stage selecting the target column
    pub stage: WeightStage,
    /// Total standard (10% moisture) feed to produce (kg)
    pub batch_size: f64,
    /// Measured kitchen-type ingredient
    pub kitchen: NutrientProfile,
    /// Measured energy-type ingredient
    pub energy: NutrientProfile,
}

impl FormulationRequest {
    /// Check raw measurements before formulation.
    ///
    /// Rejects non-positive batch sizes, negative nutrient values, and
    /// moisture outside [0, 100).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_size <= 0.0 {
            return Err(ValidationError::NonPositiveBatchSize(self.batch_size));
        }

        for profile in [&self.kitchen, &self.energy] {
            if profile.protein_percent < 0.0 {
                return Err(ValidationError::NegativeNutrient {
                    name: profile.name.clone(),
                    field: "protein_percent",
                    value: profile.protein_percent,
                });
            }
            if profile.energy_density < 0.0 {
                return Err(ValidationError::NegativeNutrient {
                    name: profile.name.clone(),
                    field: "energy_density",
                    value: profile.energy_density,
                });
            }
            if !(0.0..100.0).contains(&profile.moisture_percent) {
                return Err(ValidationError::MoistureOutOfRange {
                    name: profile.name.clone(),
                    value: profile.moisture_percent,
                });
            }
        }

        Ok(())
    }
}

/// Validation errors for formulation requests
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Batch size must be positive, got {0}")]
    NonPositiveBatchSize(f64),

    #[error("{field} of '{name}' must not be negative, got {value}")]
    NegativeNutrient {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("Moisture of '{name}' must be within [0, 100), got {value}")]
    MoistureOutOfRange { name: String, value: f64 },
}
