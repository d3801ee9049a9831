//! Green roofs.

use wb_climate::StudyArea;
use wb_core::WbResult;
use wb_core::units::Area;
use wb_results::Partition;

use crate::common::{check_area, validate_or};
use crate::traits::SurfaceElement;

/// Extensive or intensive green roof (2022 regression).
///
/// Runoff depends on the installation height `h`, the greening factor `fg`
/// and the available water capacity `awc` (WKmax - WP). Green roofs do not
/// recharge groundwater, so `v = 1 - a`.
#[derive(Debug, Clone)]
pub struct GreenRoof {
    name: String,
    area: Area,
    /// Installation height (mm)
    pub h: f64,
    pub fg: f64,
    pub awc: f64,
}

impl GreenRoof {
    pub const STANDARD_FG: f64 = 1.0;
    pub const STANDARD_AWC: f64 = 0.5;

    pub fn new(
        name: impl Into<String>,
        area: Area,
        h: f64,
        fg: Option<f64>,
        awc: Option<f64>,
    ) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            h: wb_core::validate(h, "h_green_roof")?,
            fg: validate_or(fg, Self::STANDARD_FG, "fg_green_roof")?,
            awc: validate_or(awc, Self::STANDARD_AWC, "AWC_green_roof")?,
        })
    }
}

impl SurfaceElement for GreenRoof {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        let p = study.precipitation();
        let etp = study.etp();
        let a = -8.3518 - 0.2455 * self.fg - 0.1095 * self.h.ln() - 0.05748 / self.awc
            - 0.4256 * self.awc
            + 1.781 * p.ln()
            - 0.002133 * p
            + 7.7488e-7 * (p - etp).powi(2)
            - 0.0005051 * etp;
        Ok(Partition::impervious(a))
    }
}

/// Shallow green roof below 4 cm build-up.
///
/// Climate-only regression after Schwarzer et al. (2024).
#[derive(Debug, Clone)]
pub struct GreenRoofShallow {
    name: String,
    area: Area,
}

impl GreenRoofShallow {
    pub fn new(name: impl Into<String>, area: Area) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
        })
    }
}

impl SurfaceElement for GreenRoofShallow {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        let p = study.precipitation();
        let etp = study.etp();
        let a = -1.327185 - 0.000066 * p - 0.000398 * etp + 0.336548 * p.ln()
            - 3.050779e-08 * (p - etp).powi(2);
        Ok(Partition::impervious(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_core::WbError;
    use wb_core::units::sqm;

    fn study() -> StudyArea {
        StudyArea::new(800.0, 500.0).unwrap()
    }

    #[test]
    fn green_roof_with_defaults() {
        let roof = GreenRoof::new("Green", sqm(100.0), 100.0, None, None).unwrap();
        assert_eq!(roof.fg, 1.0);
        assert_eq!(roof.awc, 0.5);
        let p = roof.partition(&study()).unwrap();
        assert!((p.a - 0.5867565516108799).abs() < 1e-9);
        assert_eq!(p.g, 0.0);
        assert!(p.is_conserved());
    }

    #[test]
    fn thicker_build_up_reduces_runoff() {
        let thin = GreenRoof::new("t", sqm(1.0), 60.0, None, None).unwrap();
        let thick = GreenRoof::new("t", sqm(1.0), 400.0, None, None).unwrap();
        let s = study();
        assert!(thick.partition(&s).unwrap().a < thin.partition(&s).unwrap().a);
    }

    #[test]
    fn green_roof_ranges() {
        assert!(GreenRoof::new("g", sqm(1.0), 40.0, Some(1.4), Some(0.3)).is_ok());
        assert!(matches!(
            GreenRoof::new("g", sqm(1.0), 39.0, None, None),
            Err(WbError::Range {
                param: "h_green_roof",
                ..
            })
        ));
        assert!(GreenRoof::new("g", sqm(1.0), 100.0, Some(1.5), None).is_err());
        assert!(GreenRoof::new("g", sqm(1.0), 100.0, None, Some(0.9)).is_err());
    }

    #[test]
    fn shallow_green_roof() {
        let roof = GreenRoofShallow::new("Shallow", sqm(50.0)).unwrap();
        let p = roof.partition(&study()).unwrap();
        assert!((p.a - 0.6679620066231853).abs() < 1e-9);
        assert!(p.is_conserved());
    }
}
