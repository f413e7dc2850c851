//! Nutritional target table
//!
//! This module manages the per-category, per-stage nutritional targets the
//! engine formulates against. The table is seeded from built-in defaults and
//! may be overwritten wholesale (an administrative edit) or persisted through
//! the JSON load/save lifecycle. The engine itself only ever reads it.

use crate::error::FormulationError;
use crate::types::{NutritionalTarget, PigCategory, WeightStage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All (category, stage) pairs a complete table must cover
pub const ALL_TARGET_KEYS: [(PigCategory, WeightStage); 4] = [
    (PigCategory::External, WeightStage::Grower),
    (PigCategory::External, WeightStage::Finisher),
    (PigCategory::Local, WeightStage::Grower),
    (PigCategory::Local, WeightStage::Finisher),
];

/// Configurable target table, read-only to the formulation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetTable {
    entries: HashMap<PigCategory, HashMap<WeightStage, NutritionalTarget>>,
}

impl Default for TargetTable {
    fn default() -> Self {
        let mut table = Self::empty();

        table.set(
            PigCategory::External,
            WeightStage::Grower,
            NutritionalTarget {
                target_protein_percent: 16.5,
                target_energy_density: 13.5,
                additive_packs_per_ton: 2.0,
                description: "under 80 kg (grower)".to_string(),
            },
        );
        table.set(
            PigCategory::External,
            WeightStage::Finisher,
            NutritionalTarget {
                target_protein_percent: 14.5,
                target_energy_density: 14.2,
                additive_packs_per_ton: 2.0,
                description: "over 80 kg (finisher)".to_string(),
            },
        );
        table.set(
            PigCategory::Local,
            WeightStage::Grower,
            NutritionalTarget {
                target_protein_percent: 15.0,
                target_energy_density: 13.0,
                additive_packs_per_ton: 1.0,
                description: "under 80 kg (grower)".to_string(),
            },
        );
        table.set(
            PigCategory::Local,
            WeightStage::Finisher,
            NutritionalTarget {
                target_protein_percent: 13.5,
                target_energy_density: 13.8,
                additive_packs_per_ton: 2.0,
                description: "over 80 kg (finisher)".to_string(),
            },
        );

        table
    }
}

impl TargetTable {
    /// Create a table with no entries; fill it with [`TargetTable::set`]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Look up the target for a category and stage.
    ///
    /// A missing entry is a configuration error, not a user error; callers
    /// are expected to supply a complete table before the first call.
    pub fn get(
        &self,
        category: PigCategory,
        stage: WeightStage,
    ) -> Result<&NutritionalTarget, FormulationError> {
        self.entries
            .get(&category)
            .and_then(|stages| stages.get(&stage))
            .ok_or(FormulationError::MissingTarget { category, stage })
    }

    /// Insert or replace one entry
    pub fn set(&mut self, category: PigCategory, stage: WeightStage, target: NutritionalTarget) {
        self.entries
            .entry(category)
            .or_default()
            .insert(stage, target);
    }

    /// True when every (category, stage) pair has an entry
    pub fn is_complete(&self) -> bool {
        ALL_TARGET_KEYS
            .iter()
            .all(|(category, stage)| self.get(*category, *stage).is_ok())
    }

    /// Load a table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the table to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_complete() {
        let table = TargetTable::default();
        assert!(table.is_complete());
    }

    #[test]
    fn test_default_values() {
        let table = TargetTable::default();

        let target = table
            .get(PigCategory::External, WeightStage::Grower)
            .unwrap();
        assert_eq!(target.target_protein_percent, 16.5);
        assert_eq!(target.target_energy_density, 13.5);
        assert_eq!(target.additive_packs_per_ton, 2.0);

        let target = table.get(PigCategory::Local, WeightStage::Grower).unwrap();
        assert_eq!(target.additive_packs_per_ton, 1.0);
    }

    #[test]
    fn test_missing_entry_fails_loudly() {
        let table = TargetTable::empty();

        let err = table
            .get(PigCategory::Local, WeightStage::Finisher)
            .unwrap_err();
        assert!(matches!(
            err,
            FormulationError::MissingTarget {
                category: PigCategory::Local,
                stage: WeightStage::Finisher,
            }
        ));
    }

    #[test]
    fn test_set_overwrites() {
        let mut table = TargetTable::default();

        table.set(
            PigCategory::External,
            WeightStage::Grower,
            NutritionalTarget {
                target_protein_percent: 18.0,
                target_energy_density: 13.2,
                additive_packs_per_ton: 3.0,
                description: "custom".to_string(),
            },
        );

        let target = table
            .get(PigCategory::External, WeightStage::Grower)
            .unwrap();
        assert_eq!(target.target_protein_percent, 18.0);
        assert_eq!(target.description, "custom");
    }

    #[test]
    fn test_json_round_trip() {
        let table = TargetTable::default();

        let json = table.to_json().unwrap();
        let loaded = TargetTable::from_json(&json).unwrap();

        assert!(loaded.is_complete());
        for (category, stage) in ALL_TARGET_KEYS {
            let orig = table.get(category, stage).unwrap();
            let round = loaded.get(category, stage).unwrap();
            assert_eq!(orig.target_protein_percent, round.target_protein_percent);
            assert_eq!(orig.target_energy_density, round.target_energy_density);
            assert_eq!(orig.additive_packs_per_ton, round.additive_packs_per_ton);
        }
    }
}
