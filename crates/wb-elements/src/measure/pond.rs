//! Ponds with a permanent water surface.

use wb_climate::StudyArea;
use wb_core::units::{Area, as_sqm};
use wb_core::{WbResult, ensure_positive};
use wb_results::{Inflow, Partition};

use crate::traits::Measure;

/// Pond system (Teichanlage).
///
/// Evaporation from the open water surface `aw` is balanced against the
/// precipitation on the pond and on its contributing area:
/// `v = ETp * Aw / (P * (Aw + Au))`, `a = 1 - v`, `g = 0`.
#[derive(Debug, Clone)]
pub struct PondSystem {
    name: String,
    /// Water surface
    aw: Area,
}

impl PondSystem {
    pub fn new(name: impl Into<String>, aw: Area) -> WbResult<Self> {
        ensure_positive(as_sqm(aw), "pond surface area")?;
        Ok(Self {
            name: name.into(),
            aw,
        })
    }
}

impl Measure for PondSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition(&self, study: &StudyArea, inflow: &Inflow) -> WbResult<Partition> {
        let aw = as_sqm(self.aw);
        let v = study.etp() * aw / (study.precipitation() * (aw + inflow.contributing_area_m2));
        if v > 1.0 {
            // Evaporation exceeds supply; cap and flag.
            return Ok(Partition {
                a: 0.0,
                g: 0.0,
                v: 1.0,
                e: 0.0,
                clamped: true,
            });
        }
        Ok(Partition::new(1.0 - v, 0.0, v, 0.0))
    }

    fn footprint(&self, _inflow: &Inflow) -> Area {
        self.aw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_core::units::sqm;

    fn inflow(au: f64) -> Inflow {
        Inflow {
            contributing_area_m2: au,
            runoff_volume_m3: 0.0,
        }
    }

    #[test]
    fn inverse_mass_balance() {
        let study = StudyArea::new(800.0, 500.0).unwrap();
        let pond = PondSystem::new("Pond", sqm(100.0)).unwrap();
        let p = pond.partition(&study, &inflow(900.0)).unwrap();
        // 500 * 100 / (800 * 1000)
        assert!((p.v - 0.0625).abs() < 1e-12);
        assert!((p.a - 0.9375).abs() < 1e-12);
        assert_eq!(p.g, 0.0);
        assert!(p.is_conserved());
        assert_eq!(as_sqm(pond.footprint(&inflow(900.0))), 100.0);
    }

    #[test]
    fn evaporation_is_capped() {
        let study = StudyArea::new(500.0, 700.0).unwrap();
        let pond = PondSystem::new("Pond", sqm(100.0)).unwrap();
        let p = pond.partition(&study, &inflow(0.0)).unwrap();
        assert_eq!(p.v, 1.0);
        assert_eq!(p.a, 0.0);
        assert!(p.clamped);
    }

    #[test]
    fn pond_needs_a_surface() {
        assert!(PondSystem::new("Pond", sqm(0.0)).is_err());
    }
}
