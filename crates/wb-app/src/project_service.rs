//! Scenario loading, saving and validation.

use std::path::Path;

use serde::Serialize;
use wb_project::Scenario;

use crate::error::{AppError, AppResult};

/// Summary of a validated scenario for listing.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub precipitation_mm: f64,
    pub etp_mm: f64,
    pub element_count: usize,
    pub measure_count: usize,
    pub connected_elements: usize,
    pub total_area_m2: f64,
}

impl ScenarioSummary {
    pub fn of(scenario: &Scenario) -> AppResult<Self> {
        let study = scenario.climate.study_area()?;
        Ok(Self {
            name: scenario.name.clone(),
            precipitation_mm: study.precipitation(),
            etp_mm: study.etp(),
            element_count: scenario.elements.len(),
            measure_count: scenario.measures.len(),
            connected_elements: scenario
                .elements
                .iter()
                .filter(|e| e.connect_to.is_some())
                .count(),
            total_area_m2: scenario.elements.iter().filter_map(|e| e.area()).sum(),
        })
    }
}

/// Load and validate a scenario (`.yaml`, `.yml` or `.json`).
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    wb_project::load(path).map_err(|e| AppError::load(path, e))
}

/// Validate and save a scenario; the format follows the file extension.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    let result = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => wb_project::save_json(path, scenario),
        _ => wb_project::save_yaml(path, scenario),
    };
    result.map_err(|e| match e {
        wb_project::ProjectError::Validation(v) => v.into(),
        other => AppError::ScenarioWrite {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}

/// Load a scenario file and summarise it.
pub fn validate_file(path: &Path) -> AppResult<ScenarioSummary> {
    let scenario = load_scenario(path)?;
    ScenarioSummary::of(&scenario)
}
