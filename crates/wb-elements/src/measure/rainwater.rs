//! Rainwater harvesting for toilet flushing and irrigation.

use wb_climate::StudyArea;
use wb_core::{WbResult, validate};
use wb_results::{Inflow, Partition};

use crate::common::validate_or;
use crate::traits::Measure;

/// Rainwater usage (Regenwassernutzung).
///
/// Evapotranspiration comes from irrigation and withdrawal from service
/// water use; both are regressed and runoff (tank overflow) is the remainder.
/// A term whose driving demand is zero is exactly zero.
///
/// The regressed `v` is passed through unclamped. With a small tank, high
/// precipitation and little irrigation it can turn negative inside the valid
/// ranges; runoff then absorbs the difference and the sum stays one.
#[derive(Debug, Clone)]
pub struct RainwaterUsage {
    name: String,
    /// Specific storage volume (mm)
    pub vsp: f64,
    /// Service water demand per contributing area (mm/d)
    pub vbr: f64,
    /// Irrigated area relative to the contributing area (-)
    pub fabw: f64,
    /// Specific irrigation demand (l/(m2*a))
    pub qbw: f64,
}

impl RainwaterUsage {
    pub const STANDARD_FABW: f64 = 2.0;
    pub const STANDARD_QBW: f64 = 60.0;

    pub fn new(
        name: impl Into<String>,
        vsp: f64,
        vbr: f64,
        fabw: Option<f64>,
        qbw: Option<f64>,
    ) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            vsp: validate(vsp, "VSp_rainwater_usage")?,
            vbr: validate(vbr, "VBr_rainwater_usage")?,
            fabw: validate_or(fabw, Self::STANDARD_FABW, "FAbw_rainwater_usage")?,
            qbw: validate_or(qbw, Self::STANDARD_QBW, "qBw_rainwater_usage")?,
        })
    }

    /// Annual irrigation demand VBw (mm/a).
    pub fn irrigation_demand(&self) -> f64 {
        self.fabw * self.qbw
    }

    /// Minimum of precipitation and total annual demand (mm/a).
    fn min_demand(&self, study: &StudyArea) -> f64 {
        study
            .precipitation()
            .min(365.0 * self.vbr + self.irrigation_demand())
    }
}

impl Measure for RainwaterUsage {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition(&self, study: &StudyArea, _inflow: &Inflow) -> WbResult<Partition> {
        let p = study.precipitation();
        let etp = study.etp();
        let vbw = self.irrigation_demand();
        let vnmin = self.min_demand(study);

        let v = if vbw == 0.0 {
            0.0
        } else {
            -0.0001927 * p + 0.0001831 * etp + 0.0006083 * vbw - 0.0000003127 * vbw.powi(2)
                - 0.3092 * (3.269 / self.vsp).exp()
                + 1.424 / (2.782 + self.vbr)
                + 0.0001885 * vnmin
        };
        let e = if self.vbr == 0.0 {
            0.0
        } else {
            0.4451 - 0.0003529 * p - 0.00007728 * etp + 0.06821 * self.vsp.log10()
                - 0.0002507 * vbw
                + 0.2349 * self.vbr.log10()
                + 0.0001738 * vnmin
        };
        Ok(Partition::runoff_after_withdrawal(v, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study() -> StudyArea {
        StudyArea::new(800.0, 500.0).unwrap()
    }

    #[test]
    fn no_service_water_means_no_withdrawal() {
        let m = RainwaterUsage::new("Tank", 50.0, 0.0, None, None).unwrap();
        let p = m.partition(&study(), &Inflow::default()).unwrap();
        assert_eq!(p.e, 0.0);
        assert!((p.v - 0.21027410872304156).abs() < 1e-9);
        assert_eq!(p.g, 0.0);
        assert!(p.is_conserved());
    }

    #[test]
    fn no_irrigation_means_no_evapotranspiration() {
        let m = RainwaterUsage::new("Tank", 50.0, 2.0, Some(0.0), None).unwrap();
        assert_eq!(m.irrigation_demand(), 0.0);
        let p = m.partition(&study(), &Inflow::default()).unwrap();
        assert_eq!(p.v, 0.0);
        assert!(p.e > 0.0);
    }

    #[test]
    fn withdrawal_and_irrigation() {
        let m = RainwaterUsage::new("Tank", 50.0, 2.0, None, None).unwrap();
        assert_eq!(m.irrigation_demand(), 120.0);
        let p = m.partition(&study(), &Inflow::default()).unwrap();
        assert!((p.v - 0.12437549316223223).abs() < 1e-9);
        assert!((p.e - 0.419694689977229).abs() < 1e-9);
        assert!((p.a - 0.45592981686053874).abs() < 1e-9);
        assert!(p.is_conserved());
    }

    #[test]
    fn small_tank_in_wet_climate_gives_negative_evapotranspiration() {
        let study = StudyArea::new(1700.0, 450.0).unwrap();
        let m = RainwaterUsage::new("Tank", 10.0, 5.0, Some(0.1), Some(10.0)).unwrap();
        let p = m.partition(&study, &Inflow::default()).unwrap();
        assert!((p.v - -0.1699067728634739).abs() < 1e-9);
        assert!((p.e - 0.3380013540185307).abs() < 1e-9);
        assert!((p.a - 0.8319054188449431).abs() < 1e-9);
        assert!(!p.clamped);
        assert!(p.is_conserved());
    }

    #[test]
    fn storage_volume_range() {
        assert!(RainwaterUsage::new("t", 9.0, 1.0, None, None).unwrap_err().is_range());
        assert!(RainwaterUsage::new("t", 10.0, 5.0, Some(5.0), Some(200.0)).is_ok());
        assert!(RainwaterUsage::new("t", 10.0, 5.1, None, None).is_err());
    }
}
