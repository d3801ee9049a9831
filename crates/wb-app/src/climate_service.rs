//! Climate resolution and the natural reference balance.

use serde::Serialize;
use tracing::info;
use wb_climate::{NaturalWaterBalance, StudyArea, natural_water_balance};
use wb_project::ClimateDef;

use crate::error::AppResult;

/// Build a study area from a place or explicit values.
pub fn resolve_climate(
    place: Option<&str>,
    precipitation_mm: Option<f64>,
    etp_mm: Option<f64>,
    correction_percent: f64,
) -> AppResult<StudyArea> {
    let def = ClimateDef {
        place: place.map(str::to_string),
        precipitation_mm,
        etp_mm,
        correction_percent,
    };
    Ok(def.study_area()?)
}

/// Inputs of a Bagrov estimate of the undeveloped state.
#[derive(Debug, Clone)]
pub struct NaturalRequest {
    pub study: StudyArea,
    /// Bagrov efficiency parameter n
    pub n: f64,
    /// Share of runoff leaving as direct (surface) runoff
    pub runoff_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NaturalResponse {
    pub precipitation_mm: f64,
    pub etp_mm: f64,
    pub balance: NaturalWaterBalance,
    /// Fractions (a, g, v) of precipitation
    pub a: f64,
    pub g: f64,
    pub v: f64,
}

pub fn natural_balance(request: &NaturalRequest) -> AppResult<NaturalResponse> {
    let balance = natural_water_balance(&request.study, request.n, request.runoff_ratio)?;
    let p = request.study.precipitation();
    info!(
        n = request.n,
        etr = balance.etr_mm,
        runoff = balance.runoff_mm,
        recharge = balance.recharge_mm,
        "natural water balance"
    );
    Ok(NaturalResponse {
        precipitation_mm: p,
        etp_mm: request.study.etp(),
        a: balance.runoff_mm / p,
        g: balance.recharge_mm / p,
        v: balance.etr_mm / p,
        balance,
    })
}
