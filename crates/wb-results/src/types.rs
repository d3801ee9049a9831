//! Result data types.

use serde::{Deserialize, Serialize};
use wb_climate::StudyArea;
use wb_core::numeric::{CONSERVATION_TOL, nearly_equal};
use wb_core::units::{as_cubic_m, sqm};

/// Partition of annual precipitation into runoff (a), groundwater recharge (g),
/// evapotranspiration (v) and withdrawal (e).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub a: f64,
    pub g: f64,
    pub v: f64,
    pub e: f64,
    /// Set when the fraction solved by difference was clamped at zero.
    #[serde(default, skip_serializing_if = "is_false")]
    pub clamped: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Partition {
    /// Fractions taken as given.
    pub fn new(a: f64, g: f64, v: f64, e: f64) -> Self {
        Self {
            a,
            g,
            v,
            e,
            clamped: false,
        }
    }

    /// Impermeable element: no recharge, evapotranspiration closes the balance.
    pub fn impervious(a: f64) -> Self {
        Self::new(a, 0.0, 1.0 - a, 0.0)
    }

    /// Regressed a and v; `g = max(1 - a - v, 0)`.
    pub fn recharge_by_difference(a: f64, v: f64) -> Self {
        let rest = 1.0 - (a + v);
        Self {
            a,
            g: rest.max(0.0),
            v,
            e: 0.0,
            clamped: rest < 0.0,
        }
    }

    /// Regressed g and v; `a = max(1 - g - v, 0)`.
    pub fn runoff_by_difference(g: f64, v: f64) -> Self {
        let rest = 1.0 - (g + v);
        Self {
            a: rest.max(0.0),
            g,
            v,
            e: 0.0,
            clamped: rest < 0.0,
        }
    }

    /// Regressed v and e (withdrawal); `a = max(1 - v - e, 0)`, `g = 0`.
    pub fn runoff_after_withdrawal(v: f64, e: f64) -> Self {
        let rest = 1.0 - (v + e);
        Self {
            a: rest.max(0.0),
            g: 0.0,
            v,
            e,
            clamped: rest < 0.0,
        }
    }

    pub fn sum(&self) -> f64 {
        self.a + self.g + self.v + self.e
    }

    /// a + g + v + e == 1 within 1e-6.
    pub fn is_conserved(&self) -> bool {
        nearly_equal(self.sum(), 1.0, CONSERVATION_TOL)
    }
}

/// What a row in a result table stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowRole {
    Surface,
    Measure,
}

/// One row of a result table.
///
/// Volumes are annual (m3/a); `vp_m3` is the precipitation falling on the
/// row's own footprint. Values are stored unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionResult {
    pub element: String,
    pub role: RowRole,
    pub area_m2: f64,
    /// Contributing (runoff producing) area
    pub au_m2: f64,
    pub precipitation_mm: f64,
    pub etp_mm: f64,
    pub a: f64,
    pub g: f64,
    pub v: f64,
    pub e: f64,
    pub vp_m3: f64,
    pub va_m3: f64,
    pub vg_m3: f64,
    pub vv_m3: f64,
    pub ve_m3: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub conservation_clamped: bool,
}

impl PartitionResult {
    /// Row of a surface element: every volume is a share of the
    /// precipitation on its own area.
    pub fn surface(
        element: impl Into<String>,
        area_m2: f64,
        study: &StudyArea,
        p: Partition,
    ) -> Self {
        let vp = as_cubic_m(study.precipitation_volume(sqm(area_m2)));
        Self {
            element: element.into(),
            role: RowRole::Surface,
            area_m2,
            au_m2: area_m2 * p.a,
            precipitation_mm: study.precipitation(),
            etp_mm: study.etp(),
            a: p.a,
            g: p.g,
            v: p.v,
            e: p.e,
            vp_m3: vp,
            va_m3: vp * p.a,
            vg_m3: vp * p.g,
            vv_m3: vp * p.v,
            ve_m3: vp * p.e,
            conservation_clamped: p.clamped,
        }
    }

    /// Row of a measure: the partition applies to the precipitation on the
    /// measure footprint plus the runoff routed into it.
    pub fn measure(
        element: impl Into<String>,
        footprint_m2: f64,
        contributing_area_m2: f64,
        inflow_volume_m3: f64,
        study: &StudyArea,
        p: Partition,
    ) -> Self {
        let vp = as_cubic_m(study.precipitation_volume(sqm(footprint_m2)));
        let total = vp + inflow_volume_m3;
        Self {
            element: element.into(),
            role: RowRole::Measure,
            area_m2: footprint_m2,
            au_m2: contributing_area_m2,
            precipitation_mm: study.precipitation(),
            etp_mm: study.etp(),
            a: p.a,
            g: p.g,
            v: p.v,
            e: p.e,
            vp_m3: vp,
            va_m3: total * p.a,
            vg_m3: total * p.g,
            vv_m3: total * p.v,
            ve_m3: total * p.e,
            conservation_clamped: p.clamped,
        }
    }

    pub fn partition(&self) -> Partition {
        Partition {
            a: self.a,
            g: self.g,
            v: self.v,
            e: self.e,
            clamped: self.conservation_clamped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recharge_by_difference_conserves() {
        let p = Partition::recharge_by_difference(0.3, 0.5);
        assert!((p.g - 0.2).abs() < 1e-12);
        assert!(!p.clamped);
        assert!(p.is_conserved());
    }

    #[test]
    fn recharge_by_difference_clamps() {
        let p = Partition::recharge_by_difference(0.6, 0.5);
        assert_eq!(p.g, 0.0);
        assert!(p.clamped);
        assert!(!p.is_conserved());
    }

    #[test]
    fn withdrawal_partition() {
        let p = Partition::runoff_after_withdrawal(0.1, 0.4);
        assert!((p.a - 0.5).abs() < 1e-12);
        assert_eq!(p.g, 0.0);
        assert!(p.is_conserved());
    }

    #[test]
    fn surface_row_volumes() {
        let study = StudyArea::new(800.0, 500.0).unwrap();
        let row = PartitionResult::surface("Roof", 1000.0, &study, Partition::impervious(0.9));
        assert!((row.vp_m3 - 800.0).abs() < 1e-9);
        assert!((row.va_m3 - 720.0).abs() < 1e-9);
        assert!((row.vv_m3 - 80.0).abs() < 1e-9);
        assert_eq!(row.vg_m3, 0.0);
        assert!((row.au_m2 - 900.0).abs() < 1e-9);
        assert_eq!(row.role, RowRole::Surface);
    }

    #[test]
    fn measure_row_volumes_include_inflow() {
        let study = StudyArea::new(800.0, 500.0).unwrap();
        let p = Partition::new(0.1, 0.7, 0.2, 0.0);
        let row = PartitionResult::measure("Swale", 50.0, 500.0, 400.0, &study, p);
        // 50 m2 * 0.8 m = 40 m3 own precipitation, plus 400 m3 inflow
        assert!((row.vp_m3 - 40.0).abs() < 1e-9);
        assert!((row.va_m3 - 44.0).abs() < 1e-9);
        assert!((row.vg_m3 - 308.0).abs() < 1e-9);
        assert_eq!(row.au_m2, 500.0);
    }
}
