//! Core types for the rationmix formulation engine
//!
//! This module defines the data structures that flow through each stage of the
//! engine: measured nutrient profiles, standard-basis intermediates, nutritional
//! targets, and the formulation result.

use serde::{Deserialize, Serialize};

/// Pig category for target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PigCategory {
    /// Three-way crossbred (Duroc x Landrace x Yorkshire)
    External,
    /// Native / black pig breeds
    Local,
}

impl PigCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PigCategory::External => "external",
            PigCategory::Local => "local",
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> &'static str {
        match self {
            PigCategory::External => "Three-way cross (DLY)",
            PigCategory::Local => "Native / black pig",
        }
    }
}

/// Growth stage for target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightStage {
    /// Under 80 kg live weight (higher protein demand)
    Grower,
    /// Over 80 kg live weight (higher energy demand)
    Finisher,
}

impl WeightStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightStage::Grower => "grower",
            WeightStage::Finisher => "finisher",
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> &'static str {
        match self {
            WeightStage::Grower => "grower (under 80 kg)",
            WeightStage::Finisher => "finisher (over 80 kg)",
        }
    }
}

/// A measured or configured ingredient sample, as-fed (not normalized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Stable ingredient key
    pub id: String,
    /// Display label
    pub name: String,
    /// Crude protein, as-measured (%)
    pub protein_percent: f64,
    /// Water content, as-measured (%); must stay below 100
    pub moisture_percent: f64,
    /// Digestible energy, as-measured (kJ/g)
    pub energy_density: f64,
}

/// Nutrient values re-expressed at the 10% reference moisture content
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StandardBasis {
    /// Crude protein at 10% moisture (%)
    pub protein: f64,
    /// Digestible energy at 10% moisture (kJ/g)
    pub energy: f64,
    /// Conversion factor k = (100 - moisture) / 90; actual = standard / k
    pub standard_factor: f64,
}

/// Per category x stage nutritional target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionalTarget {
    /// Target crude protein of the blend (%)
    pub target_protein_percent: f64,
    /// Target digestible energy of the blend (kJ/g)
    pub target_energy_density: f64,
    /// Core premix dosage, packs per 1000 kg of standard (10% moisture) feed
    pub additive_packs_per_ton: f64,
    /// Target description shown in reports
    pub description: String,
}

/// One recipe line: an ingredient or the additive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Wet, as-fed weight (kg); for the additive this is packs, not mass
    pub actual_weight: f64,
    /// 10%-moisture-equivalent weight (kg)
    pub standard_weight: f64,
    /// Share of the standard batch (%); fixed at 0 for the additive
    pub percent: f64,
    /// Short annotation (raw moisture or dosage rule)
    pub note: String,
}

/// Nutritional analysis of the blended mix
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlendAnalysis {
    /// Crude protein of the blend (%), standard-basis weighted
    pub protein_percent: f64,
    /// Digestible energy of the blend (kJ/g), standard-basis weighted
    pub energy_density: f64,
    /// Moisture of the blend (%), actual-weight weighted over raw moisture
    pub moisture_percent: f64,
    /// Dry matter of the blend (%): 100 - moisture
    pub dry_matter_percent: f64,
}

/// Complete formulation output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulationResult {
    /// Ordered recipe lines: kitchen ingredient, energy ingredient, additive
    pub line_items: Vec<LineItem>,
    /// Blended nutrition
    pub analysis: BlendAnalysis,
    /// Advisory messages (possibly empty), order: protein, energy, moisture
    pub warnings: Vec<String>,
}
