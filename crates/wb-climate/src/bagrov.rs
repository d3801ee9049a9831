//! Natural water balance estimate after Bagrov (1953).
//!
//! The Bagrov relation dE/dP = 1 - (E/Emax)^n links real evapotranspiration
//! to precipitation for a land-use dependent parameter n. In dimensionless
//! form (x = P/ETmax, y = ETR/ETmax) it is integrated numerically from y = 0.

use serde::Serialize;
use wb_core::{WbResult, validate};

use crate::StudyArea;

pub const DEFAULT_STEP: f64 = 1e-4;
pub const DEFAULT_PE_MAX: f64 = 4.0;

/// Ascending points (P/ETmax, ETR/ETmax) of a Bagrov curve.
#[derive(Debug, Clone)]
pub struct BagrovCurve {
    n: f64,
    points: Vec<(f64, f64)>,
}

impl BagrovCurve {
    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// ETR/ETmax of the curve point whose P/ETmax lies closest to `pe`.
    pub fn evapotranspiration_ratio(&self, pe: f64) -> f64 {
        self.points
            .iter()
            .min_by(|l, r| (l.0 - pe).abs().total_cmp(&(r.0 - pe).abs()))
            .map(|p| p.1)
            .unwrap_or(0.0)
    }
}

/// Integrate Bagrov's equation with step `step` up to P/ETmax < `pe_max`.
pub fn bagrov_curve(n: f64, step: f64, pe_max: f64) -> WbResult<BagrovCurve> {
    let n = validate(n, "n_bagrov")?;
    let step = validate(step, "step_bagrov")?;
    let pe_max = validate(pe_max, "pe_max_bagrov")?;

    let mut points = Vec::new();
    let mut x = 0.0;
    let mut i = 0_u64;
    loop {
        let y = i as f64 * step;
        if y >= 1.0 {
            break;
        }
        x += step / (1.0 - y.powf(n));
        // x grows monotonically, so the first point past pe_max ends the curve
        if x >= pe_max {
            break;
        }
        points.push((x, y));
        i += 1;
    }

    Ok(BagrovCurve { n, points })
}

/// Natural water balance components in mm/a.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NaturalWaterBalance {
    /// Real evapotranspiration
    pub etr_mm: f64,
    /// Direct runoff
    pub runoff_mm: f64,
    /// Groundwater recharge
    pub recharge_mm: f64,
}

impl NaturalWaterBalance {
    /// Residual of P - ETR - Rd - GWR, zero up to rounding.
    pub fn closure_error(&self, study: &StudyArea) -> f64 {
        study.precipitation() - self.etr_mm - self.runoff_mm - self.recharge_mm
    }
}

/// Estimate the site's natural water balance.
///
/// ETR comes from the Bagrov curve for `n`; the remaining runoff is split
/// into direct runoff and recharge by `direct_runoff_ratio`.
pub fn natural_water_balance(
    study: &StudyArea,
    n: f64,
    direct_runoff_ratio: f64,
) -> WbResult<NaturalWaterBalance> {
    let ratio = validate(direct_runoff_ratio, "runoff_ratio_natural")?;
    let curve = bagrov_curve(n, DEFAULT_STEP, DEFAULT_PE_MAX)?;

    let pe = study.precipitation() / study.etp();
    let etr = curve.evapotranspiration_ratio(pe) * study.etp();
    let runoff_total = study.precipitation() - etr;

    let balance = NaturalWaterBalance {
        etr_mm: etr,
        runoff_mm: ratio * runoff_total,
        recharge_mm: (1.0 - ratio) * runoff_total,
    };
    tracing::debug!(n, pe, etr, "natural water balance estimate");
    Ok(balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_ascending_and_bounded() {
        let curve = bagrov_curve(2.0, 1e-3, 4.0).unwrap();
        let pts = curve.points();
        assert!(!pts.is_empty());
        for w in pts.windows(2) {
            assert!(w[1].0 > w[0].0);
            assert!(w[1].1 > w[0].1);
        }
        let last = pts[pts.len() - 1];
        assert!(last.0 < 4.0);
        assert!(last.1 < 1.0);
    }

    #[test]
    fn small_pe_evaporates_almost_everything() {
        // for x -> 0 the curve starts with slope 1 (all water evaporates)
        let curve = bagrov_curve(3.0, 1e-4, 4.0).unwrap();
        let y = curve.evapotranspiration_ratio(0.05);
        assert!((y - 0.05).abs() < 1e-3);
    }

    #[test]
    fn larger_n_means_more_evapotranspiration() {
        let low = bagrov_curve(1.0, 1e-4, 4.0).unwrap();
        let high = bagrov_curve(5.0, 1e-4, 4.0).unwrap();
        assert!(high.evapotranspiration_ratio(1.5) > low.evapotranspiration_ratio(1.5));
    }

    #[test]
    fn natural_balance_closes() {
        let study = StudyArea::new(800.0, 600.0).unwrap();
        let nb = natural_water_balance(&study, 2.5, 0.2).unwrap();
        assert!(nb.etr_mm > 0.0 && nb.etr_mm < study.etp());
        assert!(nb.closure_error(&study).abs() < 1e-9);
        assert!((nb.runoff_mm / (nb.runoff_mm + nb.recharge_mm) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn invalid_ratio_is_rejected() {
        let study = StudyArea::default();
        assert!(natural_water_balance(&study, 2.0, 1.5).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn natural_balance_always_closes(
            p in 500.0_f64..1700.0,
            etp in 450.0_f64..700.0,
            n in 0.5_f64..10.0,
            ratio in 0.0_f64..=1.0,
        ) {
            let study = StudyArea::new(p, etp).unwrap();
            let nb = natural_water_balance(&study, n, ratio).unwrap();
            prop_assert!(nb.closure_error(&study).abs() < 1e-9);
            prop_assert!(nb.etr_mm >= 0.0 && nb.etr_mm <= etp);
        }
    }
}
