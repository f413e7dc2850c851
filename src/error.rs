//! Error types for rationmix

use crate::types::{PigCategory, WeightStage};
use thiserror::Error;

/// Errors that can occur during formulation
#[derive(Debug, Error)]
pub enum FormulationError {
    #[error("No nutritional target configured for {category:?}/{stage:?}")]
    MissingTarget {
        category: PigCategory,
        stage: WeightStage,
    },

    #[error("Moisture of '{name}' is {moisture_percent}%; standard-basis conversion requires moisture below 100%")]
    SaturatedMoisture { name: String, moisture_percent: f64 },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
