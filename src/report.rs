//! Formulation report rendering
//!
//! This module wraps a formulation result with producer and provenance
//! metadata and renders it for sharing: JSON for machines, a plain-text
//! advisory sheet for chat apps and print-outs.

use crate::error::FormulationError;
use crate::presets::CORE_PREMIX_NAME;
use crate::types::{FormulationResult, PigCategory, WeightStage};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// A formulation result with provenance, ready for sharing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulationReport {
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    /// Category label as shown to the user
    pub category: String,
    /// Stage label as shown to the user
    pub stage: String,
    /// Standard feed total the recipe was computed for (kg)
    pub batch_size: f64,
    pub result: FormulationResult,
}

/// Report renderer carrying a stable instance id
pub struct ReportRenderer {
    instance_id: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// Create a renderer with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a renderer with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Wrap a result with producer and provenance metadata
    pub fn build(
        &self,
        category: PigCategory,
        stage: WeightStage,
        batch_size: f64,
        result: FormulationResult,
    ) -> FormulationReport {
        FormulationReport {
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            category: category.label().to_string(),
            stage: stage.label().to_string(),
            batch_size,
            result,
        }
    }

    /// Encode a report to pretty-printed JSON
    pub fn to_json(&self, report: &FormulationReport) -> Result<String, FormulationError> {
        serde_json::to_string_pretty(report).map_err(FormulationError::JsonError)
    }
}

/// Render a report as a plain-text advisory sheet
pub fn render_text(report: &FormulationReport) -> String {
    let mut out = String::new();

    out.push_str("Feed formulation advisory\n");
    out.push_str(&format!(
        "Category: {} | Stage: {}\n",
        report.category, report.stage
    ));
    out.push_str(&format!(
        "Standard feed total: {} kg (10% moisture basis)\n",
        report.batch_size
    ));
    out.push_str("----------------\n");

    for item in &report.result.line_items {
        if item.name == CORE_PREMIX_NAME {
            out.push_str(&format!("- {}: {:.1} packs\n", item.name, item.actual_weight));
        } else {
            out.push_str(&format!(
                "- {}: weigh {:.1} kg\n",
                item.name, item.actual_weight
            ));
        }
    }

    out.push_str("----------------\n");
    out.push_str(&format!(
        "Blend nutrition: protein {:.1}% | energy {:.2} kJ/g | dry matter {:.0}%\n",
        report.result.analysis.protein_percent,
        report.result.analysis.energy_density,
        report.result.analysis.dry_matter_percent
    ));

    if !report.result.warnings.is_empty() {
        out.push_str("Advisories:\n");
        for warning in &report.result.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
    }

    out.push_str("Generated advisory; verify before feeding.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compute_feed_mix;
    use crate::presets;
    use crate::targets::TargetTable;
    use pretty_assertions::assert_eq;

    fn make_report() -> FormulationReport {
        let result = compute_feed_mix(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            &presets::kitchen_scraps(),
            &presets::standard_corn(),
            &TargetTable::default(),
        )
        .unwrap();

        ReportRenderer::with_instance_id("test-instance".to_string()).build(
            PigCategory::External,
            WeightStage::Grower,
            1000.0,
            result,
        )
    }

    #[test]
    fn test_report_metadata() {
        let report = make_report();

        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.version, ENGINE_VERSION);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.category, "Three-way cross (DLY)");
        assert_eq!(report.stage, "grower (under 80 kg)");
    }

    #[test]
    fn test_text_rendering() {
        let report = make_report();
        let text = render_text(&report);

        assert!(text.contains("Feed formulation advisory"));
        assert!(text.contains("Standard feed total: 1000 kg"));
        assert!(text.contains("- Kitchen scraps: weigh 2390.6 kg"));
        assert!(text.contains("- Standard corn: weigh 351.6 kg"));
        assert!(text.contains("- Core premix: 2.0 packs"));
        assert!(text.contains("protein 22.1%"));
        assert!(text.contains("energy 13.50 kJ/g"));
        // The worked example trips the moisture advisory
        assert!(text.contains("Advisories:"));
        assert!(text.contains("High moisture"));
        assert!(text.contains("verify before feeding"));
    }

    #[test]
    fn test_json_round_trip() {
        let renderer = ReportRenderer::new();
        let report = make_report();

        let json = renderer.to_json(&report).unwrap();
        let parsed: FormulationReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.producer.instance_id, report.producer.instance_id);
        assert_eq!(
            parsed.result.line_items.len(),
            report.result.line_items.len()
        );
    }
}
