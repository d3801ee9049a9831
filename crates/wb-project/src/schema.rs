//! Scenario schema definitions.

use serde::{Deserialize, Serialize};
use wb_climate::StudyArea;
use wb_core::{WbError, WbResult};
use wb_elements::{ElementKind, MeasureKind, ParamValues};

/// Current scenario file version.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub climate: ClimateDef,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    #[serde(default)]
    pub measures: Vec<MeasureDef>,
}

/// Climate of the study area: a reference place or explicit values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClimateDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etp_mm: Option<f64>,
    /// Precipitation undercatch correction, 0 - 25 %.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub correction_percent: f64,
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl ClimateDef {
    pub fn explicit(precipitation_mm: f64, etp_mm: f64) -> Self {
        Self {
            precipitation_mm: Some(precipitation_mm),
            etp_mm: Some(etp_mm),
            ..Self::default()
        }
    }

    pub fn place(place: impl Into<String>) -> Self {
        Self {
            place: Some(place.into()),
            ..Self::default()
        }
    }

    pub fn correction_factor(&self) -> f64 {
        1.0 + self.correction_percent / 100.0
    }

    /// Resolve and validate the climate.
    pub fn study_area(&self) -> WbResult<StudyArea> {
        let factor = self.correction_factor();
        match (&self.place, self.precipitation_mm, self.etp_mm) {
            (Some(place), None, None) => StudyArea::from_place(place, factor),
            (None, Some(p), Some(etp)) => StudyArea::with_correction(p, etp, factor),
            _ => Err(WbError::configuration(
                "climate needs either a place or both precipitation_mm and etp_mm",
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    pub id: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub params: ParamValues,
    /// Measure receiving this element's runoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_to: Option<String>,
}

impl ElementDef {
    pub fn new(id: impl Into<String>, kind: ElementKind, params: ParamValues) -> Self {
        Self {
            id: id.into(),
            kind,
            params,
            connect_to: None,
        }
    }

    pub fn connected_to(mut self, measure: impl Into<String>) -> Self {
        self.connect_to = Some(measure.into());
        self
    }

    /// Element area, if given as a number.
    pub fn area(&self) -> Option<f64> {
        self.params.number("area").ok().flatten()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasureDef {
    pub id: String,
    pub kind: MeasureKind,
    #[serde(default)]
    pub params: ParamValues,
    /// Later measure receiving this measure's outflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_to: Option<String>,
}

impl MeasureDef {
    pub fn new(id: impl Into<String>, kind: MeasureKind, params: ParamValues) -> Self {
        Self {
            id: id.into(),
            kind,
            params,
            connect_to: None,
        }
    }

    pub fn connected_to(mut self, measure: impl Into<String>) -> Self {
        self.connect_to = Some(measure.into());
        self
    }
}
