//! Pipeline orchestration
//!
//! This module provides the public API for rationmix. It runs the full
//! formulation pipeline: standard-basis normalization, energy-gap ratio
//! solve, weight conversion, additive dosage, blended analysis, and
//! advisory collection.

use crate::error::FormulationError;
use crate::normalizer::Normalizer;
use crate::presets::CORE_PREMIX_NAME;
use crate::request::FormulationRequest;
use crate::solver::RatioSolver;
use crate::targets::TargetTable;
use crate::types::{
    BlendAnalysis, FormulationResult, LineItem, NutrientProfile, PigCategory, WeightStage,
};
use crate::warnings::collect_warnings;

/// Compute a two-ingredient feed mix against the configured target.
///
/// `batch_size` is the total mass of standard (10% moisture) feed to
/// produce in kg, not the as-fed total. The function is pure: no I/O, no
/// shared state, same inputs give same outputs.
///
/// # Errors
/// - [`FormulationError::MissingTarget`] when the table has no entry for
///   the category/stage pair (a configuration error).
/// - [`FormulationError::SaturatedMoisture`] when a profile reports
///   moisture at or above 100%, where the standard-basis conversion
///   diverges.
pub fn compute_feed_mix(
    category: PigCategory,
    stage: WeightStage,
    batch_size: f64,
    kitchen: &NutrientProfile,
    energy: &NutrientProfile,
    targets: &TargetTable,
) -> Result<FormulationResult, FormulationError> {
    for profile in [kitchen, energy] {
        if profile.moisture_percent >= 100.0 {
            return Err(FormulationError::SaturatedMoisture {
                name: profile.name.clone(),
                moisture_percent: profile.moisture_percent,
            });
        }
    }

    // Stage 1: target lookup
    let target = targets.get(category, stage)?;

    // Stage 2: normalize both ingredients to the 10% moisture basis
    let kitchen_std = Normalizer::to_standard_basis(kitchen);
    let energy_std = Normalizer::to_standard_basis(energy);

    // Stage 3: solve the mixing ratio from the energy gap
    let ratios = RatioSolver::solve(&kitchen_std, &energy_std, target.target_energy_density);

    // Stage 4: standard-basis masses
    let energy_std_weight = ratios.energy * batch_size;
    let kitchen_std_weight = ratios.kitchen * batch_size;

    // Stage 5: back-convert to wet weights; wetter material needs more
    // as-fed mass to supply the same standard mass
    let energy_actual_weight = energy_std_weight / energy_std.standard_factor;
    let kitchen_actual_weight = kitchen_std_weight / kitchen_std.standard_factor;

    // Stage 6: additive dosage, linear in batch size, reported in packs
    let additive_packs = (target.additive_packs_per_ton / 1000.0) * batch_size;

    // Stage 7: blended analysis. Protein and energy are weighted by the
    // standard-basis shares; moisture is weighted by wet weights over the
    // raw moisture values.
    let final_protein = ratios.kitchen * kitchen_std.protein + ratios.energy * energy_std.protein;
    let final_energy = ratios.kitchen * kitchen_std.energy + ratios.energy * energy_std.energy;

    let total_actual_weight = kitchen_actual_weight + energy_actual_weight;
    let final_moisture = (energy_actual_weight * energy.moisture_percent
        + kitchen_actual_weight * kitchen.moisture_percent)
        / total_actual_weight;

    let analysis = BlendAnalysis {
        protein_percent: final_protein,
        energy_density: final_energy,
        moisture_percent: final_moisture,
        dry_matter_percent: 100.0 - final_moisture,
    };

    // Stage 8: advisories
    let warnings = collect_warnings(&analysis, target);

    Ok(FormulationResult {
        line_items: vec![
            LineItem {
                name: kitchen.name.clone(),
                actual_weight: kitchen_actual_weight,
                standard_weight: kitchen_std_weight,
                percent: ratios.kitchen * 100.0,
                note: format!("raw moisture {}%", kitchen.moisture_percent),
            },
            LineItem {
                name: energy.name.clone(),
                actual_weight: energy_actual_weight,
                standard_weight: energy_std_weight,
                percent: ratios.energy * 100.0,
                note: format!("raw moisture {}%", energy.moisture_percent),
            },
            LineItem {
                name: CORE_PREMIX_NAME.to_string(),
                actual_weight: additive_packs,
                standard_weight: additive_packs,
                percent: 0.0,
                note: format!(
                    "required: {} packs per ton of standard feed",
                    target.additive_packs_per_ton
                ),
            },
        ],
        analysis,
        warnings,
    })
}

/// Stateful engine wrapper owning a target table.
///
/// Use this when a session holds an edited target table across calls; the
/// table can be loaded from and saved to JSON. Each formulation still runs
/// the pure pipeline.
pub struct FeedProcessor {
    targets: TargetTable,
}

impl Default for FeedProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedProcessor {
    /// Create a processor seeded with the built-in target table
    pub fn new() -> Self {
        Self {
            targets: TargetTable::default(),
        }
    }

    /// Create a processor with a specific target table
    pub fn with_targets(targets: TargetTable) -> Self {
        Self { targets }
    }

    /// The active target table
    pub fn targets(&self) -> &TargetTable {
        &self.targets
    }

    /// Replace the table wholesale (an administrative edit)
    pub fn replace_targets(&mut self, targets: TargetTable) {
        self.targets = targets;
    }

    /// Load the target table from JSON
    pub fn load_targets(&mut self, json: &str) -> Result<(), FormulationError> {
        self.targets = TargetTable::from_json(json)?;
        Ok(())
    }

    /// Save the target table to JSON
    pub fn save_targets(&self) -> Result<String, FormulationError> {
        Ok(self.targets.to_json()?)
    }

    /// Formulate one request against the active table
    pub fn formulate(
        &self,
        request: &FormulationRequest,
    ) -> Result<FormulationResult, FormulationError> {
        compute_feed_mix(
            request.category,
            request.stage,
            request.batch_size,
            &request.kitchen,
            &request.energy,
            &self.targets,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::solver::{MAX_ENERGY_RATIO, NEUTRAL_RATIO};
    use crate::types::NutritionalTarget;

    fn make_profile(id: &str, protein: f64, moisture: f64, energy: f64) -> NutrientProfile {
        NutrientProfile {
            id: id.to_string(),
            name: id.to_string(),
            protein_percent: protein,
            moisture_percent: moisture,
            energy_density: energy,
        }
    }

    #[test]
    fn test_worked_example() {
        // Kitchen scraps {8.0, 75, 3.5} + standard corn {8.5, 14, 14.6},
        // External/Grower target {16.5, 13.5, 2 packs}, batch 1000 kg
        let result = compute_feed_mix(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            &presets::kitchen_scraps(),
            &presets::standard_corn(),
            &TargetTable::default(),
        )
        .unwrap();

        assert_eq!(result.line_items.len(), 3);

        // Corn share solves to (13.5 - 12.6) / 2.679 = 0.336
        let kitchen = &result.line_items[0];
        let corn = &result.line_items[1];
        let additive = &result.line_items[2];

        assert!((corn.percent - 33.594).abs() < 0.01);
        assert!((kitchen.percent - 66.406).abs() < 0.01);
        assert!((corn.standard_weight - 335.94).abs() < 0.1);
        assert!((kitchen.standard_weight - 664.06).abs() < 0.1);

        // Back-conversion: corn 335.94 / 0.9556, kitchen 664.06 / 0.2778
        assert!((corn.actual_weight - 351.57).abs() < 0.1);
        assert!((kitchen.actual_weight - 2390.6).abs() < 0.5);

        // Additive: (2 / 1000) * 1000 = 2 packs, zero blend share
        assert_eq!(additive.actual_weight, 2.0);
        assert_eq!(additive.percent, 0.0);
        assert_eq!(additive.name, CORE_PREMIX_NAME);

        // Blend energy lands on the target by construction
        assert!((result.analysis.energy_density - 13.5).abs() < 0.001);
        assert!((result.analysis.protein_percent - 22.11).abs() < 0.01);

        // Wet blend of 75% moisture scraps is far above the spoilage limit
        assert!((result.analysis.moisture_percent - 67.18).abs() < 0.05);
        assert!(
            (result.analysis.dry_matter_percent - (100.0 - result.analysis.moisture_percent))
                .abs()
                < 1e-12
        );
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("High moisture"));
    }

    #[test]
    fn test_line_item_order_and_notes() {
        let result = compute_feed_mix(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            &presets::kitchen_scraps(),
            &presets::standard_corn(),
            &TargetTable::default(),
        )
        .unwrap();

        assert_eq!(result.line_items[0].name, "Kitchen scraps");
        assert_eq!(result.line_items[1].name, "Standard corn");
        assert_eq!(result.line_items[2].name, CORE_PREMIX_NAME);

        assert!(result.line_items[0].note.contains("raw moisture 75%"));
        assert!(result.line_items[1].note.contains("raw moisture 14%"));
        assert!(result.line_items[2].note.contains("2 packs per ton"));
    }

    #[test]
    fn test_missing_target_fails() {
        let err = compute_feed_mix(
            PigCategory::Local,
            WeightStage::Finisher,
            1000.0,
            &presets::kitchen_scraps(),
            &presets::standard_corn(),
            &TargetTable::empty(),
        )
        .unwrap_err();

        assert!(matches!(err, FormulationError::MissingTarget { .. }));
    }

    #[test]
    fn test_saturated_moisture_rejected() {
        let soaked = make_profile("soaked", 8.0, 100.0, 3.5);

        let err = compute_feed_mix(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            &soaked,
            &presets::standard_corn(),
            &TargetTable::default(),
        )
        .unwrap_err();

        assert!(matches!(err, FormulationError::SaturatedMoisture { .. }));
    }

    #[test]
    fn test_degenerate_energy_gap_through_pipeline() {
        // Both ingredients at 10% moisture with equal energy: even split
        let a = make_profile("a", 16.0, 10.0, 14.0);
        let b = make_profile("b", 16.0, 10.0, 14.0);

        let result = compute_feed_mix(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            &a,
            &b,
            &TargetTable::default(),
        )
        .unwrap();

        assert_eq!(result.line_items[0].percent, NEUTRAL_RATIO * 100.0);
        assert_eq!(result.line_items[1].percent, NEUTRAL_RATIO * 100.0);
    }

    #[test]
    fn test_protein_warning_boundary_exact() {
        // k = 1 for both, equal energies force the even split, so the blend
        // protein is exactly (16 + 16) / 2 = 16.0
        let a = make_profile("a", 16.0, 10.0, 14.0);
        let b = make_profile("b", 16.0, 10.0, 14.0);

        // Target protein 16.5: blend sits exactly on target - 0.5, no warning
        let mut table = TargetTable::empty();
        table.set(
            PigCategory::External,
            WeightStage::Grower,
            NutritionalTarget {
                target_protein_percent: 16.5,
                target_energy_density: 13.5,
                additive_packs_per_ton: 2.0,
                description: "boundary".to_string(),
            },
        );

        let result = compute_feed_mix(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            &a,
            &b,
            &table,
        )
        .unwrap();
        assert!(result.warnings.is_empty());

        // Nudge the target up: the strict comparison now fires
        table.set(
            PigCategory::External,
            WeightStage::Grower,
            NutritionalTarget {
                target_protein_percent: 16.501,
                target_energy_density: 13.5,
                additive_packs_per_ton: 2.0,
                description: "boundary".to_string(),
            },
        );

        let result = compute_feed_mix(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            &a,
            &b,
            &table,
        )
        .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Protein deficit"));
    }

    #[test]
    fn test_additive_scales_linearly_with_batch() {
        let table = TargetTable::default();

        for (batch, expected_packs) in [(500.0, 1.0), (1000.0, 2.0), (2500.0, 5.0)] {
            let result = compute_feed_mix(
                PigCategory::External,
                WeightStage::Grower,
                batch,
                &presets::kitchen_scraps(),
                &presets::standard_corn(),
                &table,
            )
            .unwrap();

            let additive = &result.line_items[2];
            assert!((additive.actual_weight - expected_packs).abs() < 1e-9);
            assert_eq!(additive.percent, 0.0);
        }
    }

    #[test]
    fn test_clamped_ratio_under_extreme_target() {
        // Local/Finisher with an energy-hungry custom table drives the solve
        // past the ceiling; the share pins at the policy bound
        let mut table = TargetTable::empty();
        table.set(
            PigCategory::Local,
            WeightStage::Finisher,
            NutritionalTarget {
                target_protein_percent: 13.5,
                target_energy_density: 40.0,
                additive_packs_per_ton: 2.0,
                description: "extreme".to_string(),
            },
        );

        let result = compute_feed_mix(
            PigCategory::Local,
            WeightStage::Finisher,
            1000.0,
            &presets::kitchen_scraps(),
            &presets::standard_corn(),
            &table,
        )
        .unwrap();

        assert_eq!(result.line_items[1].percent, MAX_ENERGY_RATIO * 100.0);
    }

    #[test]
    fn test_referential_transparency() {
        let table = TargetTable::default();
        let run = || {
            compute_feed_mix(
                PigCategory::Local,
                WeightStage::Grower,
                800.0,
                &presets::kitchen_scraps(),
                &presets::custom_energy_blend(),
                &table,
            )
            .unwrap()
        };

        let first = serde_json::to_string(&run()).unwrap();
        let second = serde_json::to_string(&run()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_processor_load_save_targets() {
        let mut processor = FeedProcessor::new();

        // Edit one entry, save, reload into a fresh processor
        let mut edited = processor.targets().clone();
        edited.set(
            PigCategory::External,
            WeightStage::Grower,
            NutritionalTarget {
                target_protein_percent: 18.0,
                target_energy_density: 13.0,
                additive_packs_per_ton: 3.0,
                description: "edited".to_string(),
            },
        );
        processor.replace_targets(edited);

        let saved = processor.save_targets().unwrap();

        let mut restored = FeedProcessor::new();
        restored.load_targets(&saved).unwrap();

        let target = restored
            .targets()
            .get(PigCategory::External, WeightStage::Grower)
            .unwrap();
        assert_eq!(target.target_protein_percent, 18.0);
        assert_eq!(target.additive_packs_per_ton, 3.0);
    }

    #[test]
    fn test_processor_formulate_matches_pure_call() {
        let processor = FeedProcessor::new();
        let request = FormulationRequest {
            category: PigCategory::External,
            stage: WeightStage::Finisher,
            batch_size: 1200.0,
            kitchen: presets::kitchen_scraps(),
            energy: presets::standard_corn(),
        };

        let from_processor = processor.formulate(&request).unwrap();
        let from_pure = compute_feed_mix(
            request.category,
            request.stage,
            request.batch_size,
            &request.kitchen,
            &request.energy,
            &TargetTable::default(),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_string(&from_processor).unwrap(),
            serde_json::to_string(&from_pure).unwrap()
        );
    }
}
