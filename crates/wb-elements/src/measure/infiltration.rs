//! Infiltration measures: surface infiltration, swales and swale-trench
//! elements.
//!
//! Each measure occupies a percentage of the contributing area it drains
//! (FAsf / FAsm). If that percentage is not given, a standard value is
//! estimated from the hydraulic conductivity.

use wb_climate::StudyArea;
use wb_core::units::{Area, sqm};
use wb_core::{WbResult, validate};
use wb_results::{Inflow, Partition};

use crate::common::check_area_fraction;
use crate::traits::Measure;

/// Measure area for a percentage `fa` of the contributing area.
fn fraction_of_inflow(inflow: &Inflow, fa: f64) -> Area {
    sqm(inflow.contributing_area_m2 * fa / 100.0)
}

/// Surface infiltration (Flächenversickerung).
#[derive(Debug, Clone)]
pub struct SurfaceInfiltration {
    name: String,
    /// Hydraulic conductivity (mm/h)
    pub kf: f64,
    /// Infiltration area in % of the contributing area
    pub fasf: f64,
}

impl SurfaceInfiltration {
    pub fn standard_fasf(kf: f64) -> f64 {
        94741.0 * kf.powf(-1.195)
    }

    pub fn new(name: impl Into<String>, kf: f64, fasf: Option<f64>) -> WbResult<Self> {
        let kf = validate(kf, "kf_surf_infiltration")?;
        let fasf = check_area_fraction(fasf)?.unwrap_or_else(|| Self::standard_fasf(kf));
        Ok(Self {
            name: name.into(),
            kf,
            fasf,
        })
    }
}

impl Measure for SurfaceInfiltration {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition(&self, study: &StudyArea, _inflow: &Inflow) -> WbResult<Partition> {
        let ln_p = study.precipitation().ln();
        let ln_fa = self.fasf.ln();
        let a = 0.004264 + 0.001121 * ln_p - 0.002757 * ln_fa;
        let v = 0.3999 - 0.09317 * ln_p + 0.00009746 * study.etp() + 0.07474 * ln_fa;
        Ok(Partition::recharge_by_difference(a, v))
    }

    fn footprint(&self, inflow: &Inflow) -> Area {
        fraction_of_inflow(inflow, self.fasf)
    }
}

/// Infiltration swale (Versickerungsmulde).
///
/// Recharge and evapotranspiration are regressed; runoff (overflow) is
/// the remainder.
#[derive(Debug, Clone)]
pub struct InfiltrationSwale {
    name: String,
    pub kf: f64,
    /// Swale area in % of the contributing area
    pub fasm: f64,
}

impl InfiltrationSwale {
    pub fn standard_fasm(kf: f64) -> f64 {
        42.323 * kf.powf(-0.314)
    }

    pub fn new(name: impl Into<String>, kf: f64, fasm: Option<f64>) -> WbResult<Self> {
        let kf = validate(kf, "kf_infilt_swale")?;
        let fasm = check_area_fraction(fasm)?.unwrap_or_else(|| Self::standard_fasm(kf));
        Ok(Self {
            name: name.into(),
            kf,
            fasm,
        })
    }
}

impl Measure for InfiltrationSwale {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition(&self, study: &StudyArea, _inflow: &Inflow) -> WbResult<Partition> {
        let p = study.precipitation();
        let etp = study.etp();
        let (kf, fa) = (self.kf, self.fasm);
        let g = 0.8608 + 0.02385 * p.ln() - 0.00005331 * etp - 0.002827 * fa - 0.000002493 * kf
            + 0.0009514 * (kf / fa).ln();
        let v = 0.000008562 * etp + (2.611 / (p - 64.35)) * fa.powf(0.9425) - 0.000001211 * kf;
        Ok(Partition::runoff_by_difference(g, v))
    }

    fn footprint(&self, inflow: &Inflow) -> Area {
        fraction_of_inflow(inflow, self.fasm)
    }
}

/// Swale-trench element (Mulden-Rigolen-Element) without throttled outflow.
#[derive(Debug, Clone)]
pub struct SwaleTrench {
    name: String,
    pub kf: f64,
    pub fasm: f64,
}

impl SwaleTrench {
    pub fn standard_fasm(kf: f64) -> f64 {
        21.86 * kf.powf(-0.348)
    }

    pub fn new(name: impl Into<String>, kf: f64, fasm: Option<f64>) -> WbResult<Self> {
        let kf = validate(kf, "kf_swale_trench")?;
        let fasm = check_area_fraction(fasm)?.unwrap_or_else(|| Self::standard_fasm(kf));
        Ok(Self {
            name: name.into(),
            kf,
            fasm,
        })
    }
}

impl Measure for SwaleTrench {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition(&self, study: &StudyArea, _inflow: &Inflow) -> WbResult<Partition> {
        let p = study.precipitation();
        let (kf, fa) = (self.kf, self.fasm);
        let a = -0.03867 + 0.007684 * p.ln() + 0.000003201 * fa + 0.0002564 * kf
            - 0.0001187 * fa * kf
            + 0.004161 * (kf / fa).ln();
        let v = 0.000008879 * study.etp() + (2.528 / (p - 81.65)) * fa.powf(0.9496)
            - 0.00007768 * kf;
        Ok(Partition::recharge_by_difference(a, v))
    }

    fn footprint(&self, inflow: &Inflow) -> Area {
        fraction_of_inflow(inflow, self.fasm)
    }
}

/// Swale-trench system with throttled outflow (Mulden-Rigolen-System).
#[derive(Debug, Clone)]
pub struct SwaleTrenchSystem {
    name: String,
    /// Throttled discharge yield (l/(s*ha))
    pub qdr: f64,
    pub kf: f64,
    pub fasm: f64,
}

impl SwaleTrenchSystem {
    pub fn standard_fasm(qdr: f64, kf: f64) -> f64 {
        11.79 - 3.14 * qdr.ln() - 0.18594 * kf
    }

    pub fn new(name: impl Into<String>, qdr: f64, kf: f64, fasm: Option<f64>) -> WbResult<Self> {
        let qdr = validate(qdr, "qDr_swale_trench_system")?;
        let kf = validate(kf, "kf_swale_trench_system")?;
        let fasm = match check_area_fraction(fasm)? {
            Some(fa) => fa,
            None => wb_core::ensure_positive(
                Self::standard_fasm(qdr, kf),
                "standard swale area percentage",
            )?,
        };
        Ok(Self {
            name: name.into(),
            qdr,
            kf,
            fasm,
        })
    }
}

impl Measure for SwaleTrenchSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition(&self, study: &StudyArea, _inflow: &Inflow) -> WbResult<Partition> {
        let p = study.precipitation();
        let etp = study.etp();
        let (qdr, fa) = (self.qdr, self.fasm);
        let ln_kf = (self.kf + 1.0).ln();
        let a = 0.8112 + 0.0003473 * p - 0.00001845 * etp - 0.04793 * fa + 0.0007481 * qdr
            - 0.4389 * ln_kf;
        let v = 0.1428 - 0.02661 * p.ln() + 0.00005668 * etp + 0.0288 * fa.ln()
            - 0.0001825 * qdr
            - 0.01823 * ln_kf;
        Ok(Partition::recharge_by_difference(a, v))
    }

    fn footprint(&self, inflow: &Inflow) -> Area {
        fraction_of_inflow(inflow, self.fasm)
    }
}
