//! Impervious elements: pitched roofs, sealed flat areas and storage roofs.
//!
//! All three share one regression shape over the storage height Sp:
//! `a = c0 + cP*P + cE*ETp - cS*ln(Sp + 1)`, with `g = 0` and `v = 1 - a`.

use wb_climate::StudyArea;
use wb_core::WbResult;
use wb_core::units::Area;
use wb_results::Partition;

use crate::common::check_area;
use crate::traits::SurfaceElement;

#[derive(Debug, Clone, Copy)]
struct ImperviousCoefficients {
    c0: f64,
    cp: f64,
    ce: f64,
    cs: f64,
}

impl ImperviousCoefficients {
    fn runoff(&self, study: &StudyArea, sp: f64) -> f64 {
        self.c0 + self.cp * study.precipitation() + self.ce * study.etp()
            - self.cs * (sp + 1.0).ln()
    }
}

const ROOF: ImperviousCoefficients = ImperviousCoefficients {
    c0: 0.9115,
    cp: 0.00007063,
    ce: -0.000007498,
    cs: 0.2063,
};

const FLAT_AREA: ImperviousCoefficients = ImperviousCoefficients {
    c0: 0.8658,
    cp: 0.0001659,
    ce: -0.00009945,
    cs: 0.1542,
};

const STORAGE_ROOF: ImperviousCoefficients = ImperviousCoefficients {
    c0: 0.9231,
    cp: 0.000254,
    ce: -0.0003226,
    cs: 0.1472,
};

/// Pitched roof (any material) or flat roof with a smooth surface.
#[derive(Debug, Clone)]
pub struct Roof {
    name: String,
    area: Area,
    /// Storage height (mm)
    pub sp: f64,
}

impl Roof {
    pub const STANDARD_SP: f64 = 0.3;
    /// Smooth glass or metal roofs.
    pub const STANDARD_SP_SMOOTH: f64 = 0.6;

    pub fn new(name: impl Into<String>, area: Area, sp: f64) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            sp: wb_core::validate(sp, "Sp_roof")?,
        })
    }
}

impl SurfaceElement for Roof {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        Ok(Partition::impervious(ROOF.runoff(study, self.sp)))
    }
}

/// Sealed flat area (asphalt, concrete, joint-sealed paving).
#[derive(Debug, Clone)]
pub struct FlatArea {
    name: String,
    area: Area,
    pub sp: f64,
}

impl FlatArea {
    pub const STANDARD_SP: f64 = 1.0;

    pub fn new(name: impl Into<String>, area: Area, sp: f64) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            sp: wb_core::validate(sp, "Sp_flat_area")?,
        })
    }
}

impl SurfaceElement for FlatArea {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        Ok(Partition::impervious(FLAT_AREA.runoff(study, self.sp)))
    }
}

/// Flat roof with permanent ponding (Einstaudach).
#[derive(Debug, Clone)]
pub struct StorageRoof {
    name: String,
    area: Area,
    pub sp: f64,
}

impl StorageRoof {
    pub const STANDARD_SP: f64 = 5.0;

    pub fn new(name: impl Into<String>, area: Area, sp: f64) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            sp: wb_core::validate(sp, "Sp_storage_roof")?,
        })
    }
}

impl SurfaceElement for StorageRoof {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, study: &StudyArea) -> WbResult<Partition> {
        Ok(Partition::impervious(STORAGE_ROOF.runoff(study, self.sp)))
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
    fn roof_standard_case() {
        let roof = Roof::new("Roof", sqm(1000.0), Roof::STANDARD_SP).unwrap();
        let p = roof.partition(&study()).unwrap();
        assert!((p.a - 0.9101292522403566).abs() < 1e-12);
        assert_eq!(p.g, 0.0);
        assert!((p.v - 0.08987074775964343).abs() < 1e-12);
        assert!(p.is_conserved());

        let result = roof.evaluate(&study()).unwrap();
        let row = &result.rows()[0];
        assert!((row.vp_m3 - 800.0).abs() < 1e-9);
        assert_eq!(row.element, "Roof");
    }

    #[test]
    fn roof_storage_height_range() {
        assert!(Roof::new("r", sqm(1.0), 0.1).is_ok());
        assert!(Roof::new("r", sqm(1.0), 0.6).is_ok());
        let err = Roof::new("r", sqm(1.0), 0.6 + 1e-9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Storage height is not valid. Valid range: 0.1 - 0.6 mm"
        );
    }

    #[test]
    fn flat_area_standard_case() {
        let flat = FlatArea::new("Yard", sqm(200.0), FlatArea::STANDARD_SP).unwrap();
        let p = flat.partition(&study()).unwrap();
        assert!((p.a - 0.8419117047576565).abs() < 1e-12);
        assert!(p.is_conserved());
    }

    #[test]
    fn storage_roof_standard_case() {
        let roof = StorageRoof::new("Storage", sqm(200.0), StorageRoof::STANDARD_SP).unwrap();
        let p = roof.partition(&study()).unwrap();
        assert!((p.a - 0.7012530061296304).abs() < 1e-12);
        assert_eq!(p.g, 0.0);
        assert!(p.is_conserved());
    }

    #[test]
    fn negative_area_rejected() {
        assert!(Roof::new("r", sqm(-5.0), 0.3).is_err());
    }
}
