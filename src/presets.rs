//! Built-in ingredient presets
//!
//! Default nutrient profiles for the ingredients the formulation typically
//! starts from. Callers measuring their own material construct a
//! [`NutrientProfile`] directly; these presets match the values shipped with
//! the original field tool.

use crate::types::NutrientProfile;

/// Display name of the fixed-dosage core premix line
pub const CORE_PREMIX_NAME: &str = "Core premix";

/// Kitchen scraps, wet as collected
pub fn kitchen_scraps() -> NutrientProfile {
    NutrientProfile {
        id: "kitchen".to_string(),
        name: "Kitchen scraps".to_string(),
        protein_percent: 8.0,
        moisture_percent: 75.0,
        energy_density: 3.5,
    }
}

/// Standard corn, air-dry
pub fn standard_corn() -> NutrientProfile {
    NutrientProfile {
        id: "corn".to_string(),
        name: "Standard corn".to_string(),
        protein_percent: 8.5,
        moisture_percent: 14.0,
        energy_density: 14.6,
    }
}

/// Custom energy blend starting point
pub fn custom_energy_blend() -> NutrientProfile {
    NutrientProfile {
        id: "custom_energy".to_string(),
        name: "Custom energy blend".to_string(),
        protein_percent: 9.0,
        moisture_percent: 13.0,
        energy_density: 15.0,
    }
}

/// Core premix; carries dosage only, no nutrient contribution
pub fn core_premix() -> NutrientProfile {
    NutrientProfile {
        id: "core".to_string(),
        name: CORE_PREMIX_NAME.to_string(),
        protein_percent: 0.0,
        moisture_percent: 5.0,
        energy_density: 0.0,
    }
}
