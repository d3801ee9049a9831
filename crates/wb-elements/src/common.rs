//! Common helpers for the partition formulas.

use tracing::warn;
use wb_core::numeric::{ensure_non_negative, ensure_positive};
use wb_core::units::{Area, as_sqm, sqm};
use wb_core::{WbResult, validate};
use wb_results::Partition;

/// Check that an element area is finite and not negative.
///
/// Zero is accepted; such elements contribute nothing.
pub fn check_area(area: Area) -> WbResult<Area> {
    ensure_non_negative(as_sqm(area), "area").map(sqm)
}

/// Validate an optional parameter, falling back to `standard` when absent.
pub fn validate_or(value: Option<f64>, standard: f64, name: &str) -> WbResult<f64> {
    validate(value.unwrap_or(standard), name)
}

/// Explicit percentage area of a measure (FAsf, FAsm).
pub fn check_area_fraction(value: Option<f64>) -> WbResult<Option<f64>> {
    value
        .map(|fa| ensure_positive(fa, "percentage of infiltration area"))
        .transpose()
}

/// Emit the soft conservation warning for clamped partitions.
pub fn warn_if_clamped(element: &str, p: &Partition) {
    if p.clamped {
        warn!(
            element,
            a = p.a,
            g = p.g,
            v = p.v,
            e = p.e,
            sum = p.sum(),
            "partition outside its physical domain, clamped"
        );
    }
}
