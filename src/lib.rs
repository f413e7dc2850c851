//! rationmix - Formulation engine for two-ingredient livestock feed rations
//!
//! rationmix turns measured nutrient inputs and a configurable nutritional
//! target table into a feed-mixing recipe through a deterministic pipeline:
//! standard-basis normalization → energy-gap ratio solve → weight conversion
//! → blended analysis → advisory warnings.
//!
//! ## Modules
//!
//! - **Engine**: [`pipeline::compute_feed_mix`], a pure function over two
//!   [`types::NutrientProfile`]s and a [`targets::TargetTable`]
//! - **Session wrapper**: [`pipeline::FeedProcessor`], owning an editable
//!   target table with a JSON load/save lifecycle
//! - **Reporting**: [`report`], producer/provenance metadata and a plain-text
//!   advisory sheet

pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod presets;
pub mod report;
pub mod request;
pub mod solver;
pub mod targets;
pub mod types;
pub mod warnings;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use error::FormulationError;
pub use pipeline::{compute_feed_mix, FeedProcessor};
pub use request::FormulationRequest;
pub use targets::TargetTable;
pub use types::{FormulationResult, NutrientProfile, PigCategory, WeightStage};

/// Engine version embedded in all reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "rationmix";
