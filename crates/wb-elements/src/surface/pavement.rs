//! Partially permeable pavements.

use wb_climate::StudyArea;
use wb_core::units::Area;
use wb_core::{WbError, WbResult, validate};
use wb_results::Partition;

use crate::common::{check_area, validate_or};
use crate::traits::SurfaceElement;

/// Coefficient set of a permeable surface, chosen by joint ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointBand {
    /// 2 % <= FA <= 5 %
    Narrow,
    /// 6 % <= FA <= 10 %
    Wide,
}

impl JointBand {
    /// The regressions are not defined between 5 % and 6 %.
    pub fn of(fa: f64) -> WbResult<Self> {
        if (2.0..=5.0).contains(&fa) {
            Ok(JointBand::Narrow)
        } else if (6.0..=10.0).contains(&fa) {
            Ok(JointBand::Wide)
        } else {
            Err(WbError::unknown_category(
                "joint ratio band (2-5 % or 6-10 %)",
                fa.to_string(),
            ))
        }
    }

    /// Standard hydraulic conductivity (mm/h).
    pub fn standard_kf(self) -> f64 {
        match self {
            JointBand::Narrow => 18.0,
            JointBand::Wide => 36.0,
        }
    }
}

/// Paving with open joints (joint ratio FA 2 - 10 %).
#[derive(Debug, Clone)]
pub struct PermeableSurface {
    name: String,
    area: Area,
    /// Joint ratio (%)
    pub fa: f64,
    /// Hydraulic conductivity of the joint filling (mm/h)
    pub kf: f64,
    pub sp: f64,
    pub wkmax_wp: f64,
    band: JointBand,
}

impl PermeableSurface {
    pub const STANDARD_SP: f64 = 1.0;
    pub const STANDARD_WKMAX_WP: f64 = 0.15;

    pub fn new(
        name: impl Into<String>,
        area: Area,
        fa: f64,
        kf: Option<f64>,
        sp: Option<f64>,
        wkmax_wp: Option<f64>,
    ) -> WbResult<Self> {
        let fa = validate(fa, "FA_permeable_surface")?;
        let band = JointBand::of(fa)?;
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            fa,
            kf: validate_or(kf, band.standard_kf(), "kf_permeable_surface")?,
            sp: validate_or(sp, Self::STANDARD_SP, "Sp_permeable_surface")?,
            wkmax_wp: validate_or(wkmax_wp, Self::STANDARD_WKMAX_WP, "WKmax_WP_permeable_surface")?,
            band,
        })
    }

    pub fn band(&self) -> JointBand {
        self.band
    }
}

impl SurfaceElement for PermeableSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        let ln_p = study.precipitation().ln();
        let etp = study.etp();
        let (fa, kf, sp, wk) = (self.fa, self.kf, self.sp, self.wkmax_wp);

        let (a, v) = match self.band {
            JointBand::Narrow => (
                0.0800734 * ln_p - 0.0582828 * fa - 0.0501693 * sp - 0.385767 * wk
                    + 8.7040284 / (11.9086896 + kf),
                0.8529 - 0.1248 * ln_p + 0.00005057 * etp + 0.002372 * fa
                    + 0.1583 * (1.0 + sp).ln(),
            ),
            JointBand::Wide => (
                0.05912 * ln_p - 0.02749 * fa - 0.03671 * sp - 0.30514 * wk
                    + 4.97687 / (4.7975 + kf),
                0.9012 - 0.1325 * ln_p + 0.00006661 * etp + 0.002302 * fa
                    + 0.1489 * (1.0 + sp).ln(),
            ),
        };
        Ok(Partition::recharge_by_difference(a, v))
    }
}

/// v regression shared by porous surfaces and gravel covers.
fn porous_evapotranspiration(study: &StudyArea, sp: f64, h: f64, kf: f64) -> f64 {
    0.2111 - 0.2544 * study.precipitation().ln() + 0.2073 * study.etp().ln() + 0.0006249 * sp
        + 0.123 * h.ln()
        - 0.000002806 * kf
}

/// Porous and seepage stones, gravel lawn.
#[derive(Debug, Clone)]
pub struct PorousSurface {
    name: String,
    area: Area,
    pub sp: f64,
    /// Installation height (mm)
    pub h: f64,
    pub kf: f64,
}

impl PorousSurface {
    pub const STANDARD_SP: f64 = 3.5;
    pub const STANDARD_H: f64 = 100.0;
    pub const STANDARD_KF: f64 = 180.0;

    pub fn new(
        name: impl Into<String>,
        area: Area,
        sp: Option<f64>,
        h: Option<f64>,
        kf: Option<f64>,
    ) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            sp: validate_or(sp, Self::STANDARD_SP, "Sp_porous_surface")?,
            h: validate_or(h, Self::STANDARD_H, "h_porous_surface")?,
            kf: validate_or(kf, Self::STANDARD_KF, "kf_porous_surface")?,
        })
    }
}

impl SurfaceElement for PorousSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        let a = 0.000001969 * study.precipitation() - 0.005116 * self.sp.ln()
            - 0.0001051 * self.h
            + 0.01753 * (4.576 / self.kf).exp();
        let v = porous_evapotranspiration(study, self.sp, self.h, self.kf);
        Ok(Partition::recharge_by_difference(a, v))
    }
}

/// Lawn pavers and grid stones (Rasengittersteine).
#[derive(Debug, Clone)]
pub struct PaverStonegrid {
    name: String,
    area: Area,
    pub fa: f64,
    pub sp: f64,
    pub wkmax_wp: f64,
}

impl PaverStonegrid {
    pub const STANDARD_FA: f64 = 25.0;
    pub const STANDARD_SP: f64 = 1.0;
    pub const STANDARD_WKMAX_WP: f64 = 0.15;

    pub fn new(
        name: impl Into<String>,
        area: Area,
        fa: Option<f64>,
        sp: Option<f64>,
        wkmax_wp: Option<f64>,
    ) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            fa: validate_or(fa, Self::STANDARD_FA, "FA_paver_stonegrid")?,
            sp: validate_or(sp, Self::STANDARD_SP, "Sp_paver_stonegrid")?,
            wkmax_wp: validate_or(wkmax_wp, Self::STANDARD_WKMAX_WP, "WKmax_WP_paver_stonegrid")?,
        })
    }
}

impl SurfaceElement for PaverStonegrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        let a = 0.145704 - 0.059177 * self.fa.ln() - 0.007354 * self.sp
            - 0.050531 * self.wkmax_wp.ln();
        let v = 1.106 - 0.1625 * study.precipitation().ln() + 0.0001282 * study.etp()
            + 0.1131 * (1.0 + self.sp).ln()
            + 0.2848 * self.wkmax_wp;
        Ok(Partition::recharge_by_difference(a, v))
    }
}

/// Water-bound surface (wassergebundene Decke) or gravel cover.
#[derive(Debug, Clone)]
pub struct GravelCover {
    name: String,
    area: Area,
    pub h: f64,
    pub sp: f64,
    pub kf: f64,
}

impl GravelCover {
    pub const STANDARD_H: f64 = 100.0;
    pub const STANDARD_SP: f64 = 3.5;
    pub const STANDARD_KF: f64 = 1.8;

    pub fn new(
        name: impl Into<String>,
        area: Area,
        h: Option<f64>,
        sp: Option<f64>,
        kf: Option<f64>,
    ) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            h: validate_or(h, Self::STANDARD_H, "h_gravel_cover")?,
            sp: validate_or(sp, Self::STANDARD_SP, "Sp_gravel_cover")?,
            kf: validate_or(kf, Self::STANDARD_KF, "kf_gravel_cover")?,
        })
    }
}

impl SurfaceElement for GravelCover {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        let a = 0.00004517 * study.precipitation() - 0.03454 * self.sp.ln()
            + 0.1958 / (0.2873 + self.kf);
        let v = porous_evapotranspiration(study, self.sp, self.h, self.kf);
        Ok(Partition::recharge_by_difference(a, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_core::units::sqm;

    fn study() -> StudyArea {
        StudyArea::new(800.0, 500.0).unwrap()
    }

    #[test]
    fn permeable_narrow_joints() {
        let s = PermeableSurface::new("Paving", sqm(100.0), 3.0, None, None, None).unwrap();
        assert_eq!(s.band(), JointBand::Narrow);
        assert_eq!(s.kf, 18.0);
        let p = s.partition(&study()).unwrap();
        assert!((p.a - 0.5433968906258474).abs() < 1e-9);
        assert!((p.v - 0.16078665506968204).abs() < 1e-9);
        assert!((p.g - 0.29581645430447057).abs() < 1e-9);
        assert!(!p.clamped);
        assert!(p.is_conserved());
    }

    #[test]
    fn permeable_wide_joints() {
        let s = PermeableSurface::new("Paving", sqm(100.0), 8.0, None, None, None).unwrap();
        assert_eq!(s.band(), JointBand::Wide);
        assert_eq!(s.kf, 36.0);
        let p = s.partition(&study()).unwrap();
        assert!((p.a - 0.2147828280347459).abs() < 1e-9);
        assert!((p.g - 0.6147976106958786).abs() < 1e-9);
        assert!(p.is_conserved());
    }

    #[test]
    fn permeable_band_boundaries() {
        for fa in [2.0, 5.0, 6.0, 10.0] {
            assert!(PermeableSurface::new("p", sqm(1.0), fa, None, None, None).is_ok());
        }
    }

    #[test]
    fn permeable_joint_gap_is_unknown_category() {
        for fa in [5.0 + 1e-9, 5.5, 6.0 - 1e-9] {
            let err = PermeableSurface::new("p", sqm(1.0), fa, None, None, None).unwrap_err();
            assert!(matches!(err, WbError::UnknownCategory { .. }), "{err}");
        }
        let err = PermeableSurface::new("p", sqm(1.0), 11.0, None, None, None).unwrap_err();
        assert!(err.is_range());
    }

    #[test]
    fn permeable_clamps_negative_recharge() {
        let s = PermeableSurface::new("p", sqm(1.0), 2.0, Some(6.0), Some(2.0), Some(0.1)).unwrap();
        let dry = StudyArea::new(500.0, 700.0).unwrap();
        let p = s.partition(&dry).unwrap();
        assert!((p.a - 0.7281665290335453).abs() < 1e-9);
        assert!((p.v - 0.29137023461307227).abs() < 1e-9);
        assert!(p.a + p.v > 1.0);
        assert_eq!(p.g, (1.0 - p.a - p.v).max(0.0));
        assert_eq!(p.g, 0.0);
        assert!(p.clamped);
    }

    #[test]
    fn porous_surface_defaults() {
        let s = PorousSurface::new("Porous", sqm(100.0), None, None, None).unwrap();
        let p = s.partition(&study()).unwrap();
        assert!((p.a - 0.002637429245129731).abs() < 1e-9);
        assert!((p.v - 0.3669410381607349).abs() < 1e-9);
        assert!((p.g - 0.6304215325941354).abs() < 1e-9);
        assert!(p.is_conserved());
    }

    #[test]
    fn paver_stonegrid_defaults() {
        let s = PaverStonegrid::new("Grid", sqm(100.0), None, None, None).unwrap();
        let p = s.partition(&study()).unwrap();
        assert!((p.a - 0.04372995526804298).abs() < 1e-9);
        assert!((p.v - 0.2049655403752918).abs() < 1e-9);
        assert!(p.is_conserved());
    }

    #[test]
    fn gravel_cover_defaults() {
        let s = GravelCover::new("Gravel", sqm(100.0), None, None, None).unwrap();
        let p = s.partition(&study()).unwrap();
        assert!((p.a - 0.08667096159698712).abs() < 1e-9);
        assert!((p.g - 0.5458879710422779).abs() < 1e-9);
        assert!(p.is_conserved());
    }

    #[test]
    fn gravel_cover_ranges() {
        assert!(GravelCover::new("g", sqm(1.0), None, None, Some(0.72)).is_ok());
        assert!(GravelCover::new("g", sqm(1.0), None, None, Some(0.7)).is_err());
        assert!(GravelCover::new("g", sqm(1.0), Some(49.0), None, None).is_err());
    }
}
