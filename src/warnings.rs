//! Advisory warnings
//!
//! This module checks the blended analysis against the nutritional target and
//! produces human-readable advisories. Advisories are not errors: the recipe
//! is still returned, and any subset of the three checks may fire. The order
//! is fixed: protein, then energy, then moisture.

use crate::types::{BlendAnalysis, NutritionalTarget};

/// Protein shortfall below target that triggers the deficit warning (%)
pub const PROTEIN_TOLERANCE: f64 = 0.5;

/// Energy shortfall below target that triggers the deficit warning (kJ/g)
pub const ENERGY_TOLERANCE: f64 = 0.2;

/// Blend moisture above this triggers the spoilage advisory (%)
pub const SPOILAGE_MOISTURE_LIMIT: f64 = 50.0;

/// Collect advisory messages for a blend against its target.
///
/// Comparisons are strict: a blend sitting exactly on `target - tolerance`
/// does not fire the deficit warning. The moisture advisory is independent of
/// the target table.
pub fn collect_warnings(analysis: &BlendAnalysis, target: &NutritionalTarget) -> Vec<String> {
    let mut warnings = Vec::new();

    if analysis.protein_percent < target.target_protein_percent - PROTEIN_TOLERANCE {
        warnings.push(format!(
            "Protein deficit: blend provides {:.1}% crude protein, below the {}% target. Consider adding soybean meal or another quality protein source.",
            analysis.protein_percent, target.target_protein_percent
        ));
    }

    if analysis.energy_density < target.target_energy_density - ENERGY_TOLERANCE {
        warnings.push(format!(
            "Energy shortfall: blend provides {:.2} kJ/g, below the {} kJ/g target. Consider raising the corn or bread-meal share.",
            analysis.energy_density, target.target_energy_density
        ));
    }

    if analysis.moisture_percent > SPOILAGE_MOISTURE_LIMIT {
        warnings.push(format!(
            "High moisture: blend moisture reaches {:.0}%. Mix fresh daily and guard against souring.",
            analysis.moisture_percent
        ));
    }

    warnings
}
