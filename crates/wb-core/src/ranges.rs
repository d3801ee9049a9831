//! Validity ranges of the regression parameters.
//!
//! Every regression equation is only calibrated inside a box of parameter
//! values. The table below is the single process-wide registry of those
//! boxes; it is `const` data and never changes at runtime.

use crate::error::{WbError, WbResult};

/// Inclusive validity interval of one named parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub label: &'static str,
    pub unit: &'static str,
}

impl ParameterRange {
    const fn new(
        name: &'static str,
        min: f64,
        max: f64,
        label: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            name,
            min,
            max,
            label,
            unit,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check `value` against this range; bounds are inclusive.
    pub fn check(&self, value: f64) -> WbResult<f64> {
        if !value.is_finite() {
            return Err(WbError::NonFinite {
                what: self.name,
                value,
            });
        }
        if self.contains(value) {
            Ok(value)
        } else {
            Err(WbError::Range {
                param: self.name,
                label: self.label,
                min: self.min,
                max: self.max,
                unit: self.unit,
                value,
            })
        }
    }
}

#[rustfmt::skip]
const RANGES: [ParameterRange; 38] = [
    // climate
    ParameterRange::new("P", 500.0, 1700.0, "Precipitation", "mm/a"),
    ParameterRange::new("ETp", 450.0, 700.0, "Potential evapotranspiration", "mm/a"),
    ParameterRange::new("P_correction", 1.0, 1.25, "Precipitation correction factor", "-"),
    // surfaces
    ParameterRange::new("Sp_roof", 0.1, 0.6, "Storage height", "mm"),
    ParameterRange::new("Sp_flat_area", 0.6, 3.0, "Storage height", "mm"),
    ParameterRange::new("h_green_roof", 40.0, 500.0, "Installation height", "mm"),
    ParameterRange::new("fg_green_roof", 1.0, 1.4, "Greening factor", "-"),
    ParameterRange::new("AWC_green_roof", 0.3, 0.8, "Available water capacity (WKmax - WP)", "-"),
    ParameterRange::new("Sp_storage_roof", 3.0, 10.0, "Storage height", "mm"),
    ParameterRange::new("FA_permeable_surface", 2.0, 10.0, "Joint ratio", "%"),
    ParameterRange::new("Sp_permeable_surface", 0.1, 2.0, "Storage height", "mm"),
    ParameterRange::new("WKmax_WP_permeable_surface", 0.1, 0.2, "Difference (WKmax - WP)", "-"),
    ParameterRange::new("kf_permeable_surface", 6.0, 100.0, "Hydraulic conductivity", "mm/h"),
    ParameterRange::new("Sp_porous_surface", 2.5, 4.2, "Storage height", "mm"),
    ParameterRange::new("h_porous_surface", 50.0, 100.0, "Installation height", "mm"),
    ParameterRange::new("kf_porous_surface", 10.0, 180.0, "Hydraulic conductivity", "mm/h"),
    ParameterRange::new("FA_paver_stonegrid", 20.0, 30.0, "Joint ratio", "%"),
    ParameterRange::new("Sp_paver_stonegrid", 0.1, 2.0, "Storage height", "mm"),
    ParameterRange::new("WKmax_WP_paver_stonegrid", 0.1, 0.2, "Difference (WKmax - WP)", "-"),
    ParameterRange::new("h_gravel_cover", 50.0, 100.0, "Installation height", "mm"),
    ParameterRange::new("Sp_gravel_cover", 2.5, 4.2, "Storage height", "mm"),
    ParameterRange::new("kf_gravel_cover", 0.72, 10.0, "Hydraulic conductivity", "mm/h"),
    ParameterRange::new("a_garden", 0.0, 1.0, "Runoff fraction (a)", "-"),
    ParameterRange::new("g_garden", 0.0, 1.0, "Recharge fraction (g)", "-"),
    ParameterRange::new("v_garden", 0.0, 1.0, "Evapotranspiration fraction (v)", "-"),
    // measures
    ParameterRange::new("kf_surf_infiltration", 325.0, 1100.0, "Hydraulic conductivity", "mm/h"),
    ParameterRange::new("kf_infilt_swale", 14.0, 3600.0, "Hydraulic conductivity", "mm/h"),
    ParameterRange::new("kf_swale_trench", 3.6, 36.0, "Hydraulic conductivity", "mm/h"),
    ParameterRange::new("qDr_swale_trench_system", 1.0, 10.0, "Throttled discharge yield", "l/(s*ha)"),
    ParameterRange::new("kf_swale_trench_system", 0.36, 3.6, "Hydraulic conductivity", "mm/h"),
    ParameterRange::new("VSp_rainwater_usage", 10.0, 200.0, "Specific storage volume", "mm"),
    ParameterRange::new("VBr_rainwater_usage", 0.0, 5.0, "Available water volume", "mm/d"),
    ParameterRange::new("FAbw_rainwater_usage", 0.0, 5.0, "Proportion of irrigated area", "-"),
    ParameterRange::new("qBw_rainwater_usage", 0.0, 200.0, "Specific annual requirement for irrigation", "l/(m^2*a)"),
    // natural reference state
    ParameterRange::new("n_bagrov", 0.1, 20.0, "Bagrov parameter n", "-"),
    ParameterRange::new("runoff_ratio_natural", 0.0, 1.0, "Direct runoff ratio", "-"),
    ParameterRange::new("step_bagrov", 1e-6, 0.1, "Bagrov integration step", "-"),
    ParameterRange::new("pe_max_bagrov", 1.0, 20.0, "Upper bound of P/ETmax", "-"),
];

/// All registered ranges, in table order.
pub fn all() -> &'static [ParameterRange] {
    &RANGES
}

/// Look up the registered range of a parameter.
pub fn lookup(name: &str) -> WbResult<&'static ParameterRange> {
    RANGES
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| WbError::UnknownParameter {
            name: name.to_string(),
        })
}

/// Check `value` against the registered range of `name`.
///
/// Both bounds are inclusive. Returns the value unchanged on success so
/// callers can validate inline: `let kf = validate(kf, "kf_infilt_swale")?;`
pub fn validate(value: f64, name: &str) -> WbResult<f64> {
    lookup(name)?.check(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_well_formed() {
        let mut names = HashSet::new();
        for r in all() {
            assert!(r.min <= r.max, "{} has min > max", r.name);
            assert!(names.insert(r.name), "duplicate range {}", r.name);
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        for r in all() {
            assert_eq!(validate(r.min, r.name), Ok(r.min));
            assert_eq!(validate(r.max, r.name), Ok(r.max));
            assert!(validate(r.min - 1e-9, r.name).is_err());
            assert!(validate(r.max + 1e-9, r.name).is_err());
        }
    }

    #[test]
    fn error_carries_label_bounds_and_unit() {
        let err = validate(0.7, "Sp_roof").unwrap_err();
        assert_eq!(
            err,
            WbError::Range {
                param: "Sp_roof",
                label: "Storage height",
                min: 0.1,
                max: 0.6,
                unit: "mm",
                value: 0.7,
            }
        );
        assert_eq!(
            err.to_string(),
            "Storage height is not valid. Valid range: 0.1 - 0.6 mm"
        );
    }

    #[test]
    fn unknown_parameter_is_reported() {
        assert!(matches!(
            validate(1.0, "Sp_nowhere"),
            Err(WbError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn nan_never_passes() {
        assert!(matches!(
            validate(f64::NAN, "P"),
            Err(WbError::NonFinite { .. })
        ));
    }
}
