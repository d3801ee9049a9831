//! Climate context of one computation run.

use std::fmt;

use serde::Serialize;
use wb_core::units::{Area, Length, Volume, depth_volume, mm};
use wb_core::{WbResult, validate};

use crate::catalog;

/// Validated annual precipitation and potential evapotranspiration (mm/a).
///
/// Built once per run and never mutated; a precipitation correction factor
/// is folded in before validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StudyArea {
    precipitation: f64,
    etp: f64,
}

impl StudyArea {
    pub fn new(precipitation: f64, etp: f64) -> WbResult<Self> {
        Ok(Self {
            precipitation: validate(precipitation, "P")?,
            etp: validate(etp, "ETp")?,
        })
    }

    /// Scale measured precipitation by an undercatch correction factor
    /// (1.0 to 1.25) before validating it.
    pub fn with_correction(precipitation: f64, etp: f64, correction_factor: f64) -> WbResult<Self> {
        let factor = validate(correction_factor, "P_correction")?;
        Self::new(precipitation * factor, etp)
    }

    /// Climate of a place from the reference table.
    pub fn from_place(place: &str, correction_factor: f64) -> WbResult<Self> {
        let record = catalog::lookup(place)?;
        tracing::debug!(
            place = record.place,
            p = record.precipitation_mm,
            etp = record.etp_mm,
            "climate from reference table"
        );
        Self::with_correction(record.precipitation_mm, record.etp_mm, correction_factor)
    }

    /// Mean annual precipitation (mm/a)
    pub fn precipitation(&self) -> f64 {
        self.precipitation
    }

    /// Mean annual potential evapotranspiration (mm/a)
    pub fn etp(&self) -> f64 {
        self.etp
    }

    pub fn precipitation_depth(&self) -> Length {
        mm(self.precipitation)
    }

    /// Annual precipitation volume falling on `area`.
    pub fn precipitation_volume(&self, area: Area) -> Volume {
        depth_volume(area, self.precipitation_depth())
    }
}

impl Default for StudyArea {
    fn default() -> Self {
        Self {
            precipitation: 800.0,
            etp: 500.0,
        }
    }
}

impl fmt::Display for StudyArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Study area has a precipitation of {} mm/a, and potential evapotranspiration of {} mm/a",
            self.precipitation, self.etp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_core::WbError;
    use wb_core::units::{as_cubic_m, sqm};

    #[test]
    fn validates_climate() {
        assert!(StudyArea::new(800.0, 500.0).is_ok());
        assert!(matches!(
            StudyArea::new(450.0, 500.0),
            Err(WbError::Range { param: "P", .. })
        ));
        assert!(matches!(
            StudyArea::new(800.0, 720.0),
            Err(WbError::Range { param: "ETp", .. })
        ));
    }

    #[test]
    fn correction_is_applied_before_validation() {
        let s = StudyArea::with_correction(800.0, 500.0, 1.1).unwrap();
        assert!((s.precipitation() - 880.0).abs() < 1e-9);

        // 480 mm alone is out of range, corrected by 10 % it is not
        assert!(StudyArea::new(480.0, 500.0).is_err());
        assert!(StudyArea::with_correction(480.0, 500.0, 1.1).is_ok());

        assert!(StudyArea::with_correction(800.0, 500.0, 1.3).is_err());
    }

    #[test]
    fn from_place_uses_table() {
        let s = StudyArea::from_place("Hamburg", 1.0).unwrap();
        assert_eq!(s.precipitation(), 790.0);
        assert_eq!(s.etp(), 600.8);
    }

    #[test]
    fn precipitation_volume_in_cubic_meters() {
        let s = StudyArea::default();
        let v = s.precipitation_volume(sqm(1000.0));
        assert!((as_cubic_m(v) - 800.0).abs() < 1e-9);
    }
}
