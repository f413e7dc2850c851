//! Standard-basis normalization
//!
//! This module converts as-measured nutrient profiles to the 10% reference
//! moisture basis. Two ingredients with different raw moisture cannot be
//! compared or blended by raw percentages; re-expressing both at a common
//! moisture content makes their protein and energy values commensurable.

use crate::types::{NutrientProfile, StandardBasis};

/// Reference moisture content of standard feed (%)
pub const REFERENCE_MOISTURE: f64 = 10.0;

/// Normalizer for converting as-fed profiles to the standard basis
pub struct Normalizer;

impl Normalizer {
    /// Re-express a profile at the 10% reference moisture content.
    ///
    /// `k = (100 - moisture) / 90` is the ratio of the sample's
    /// dry-matter-bearing fraction to the reference fraction. Dividing the
    /// as-fed values by `k` yields the values the same material would show
    /// at exactly 10% moisture. The factor is kept so callers can convert
    /// standard weights back to wet weights (`actual = standard / k`).
    ///
    /// Callers must reject `moisture_percent >= 100` before this point; the
    /// conversion diverges as `k` approaches zero.
    pub fn to_standard_basis(profile: &NutrientProfile) -> StandardBasis {
        let k = (100.0 - profile.moisture_percent) / (100.0 - REFERENCE_MOISTURE);
        StandardBasis {
            protein: profile.protein_percent / k,
            energy: profile.energy_density / k,
            standard_factor: k,
        }
    }
}
