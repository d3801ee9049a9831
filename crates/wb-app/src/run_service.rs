//! Scenario execution: build elements and measures, route their tables and
//! summarise the system.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};
use wb_climate::StudyArea;
use wb_elements::{Measure, SurfaceElement};
use wb_project::{Scenario, validate_scenario};
use wb_results::{PartitionResult, Presentation, ResultTable, SystemTotal, WaterBalance, watbal};

use crate::error::AppResult;
use crate::project_service;

/// Result of running one scenario.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub scenario_name: String,
    pub study: StudyArea,
    pub balance: WaterBalance,
    /// Elements and measures left out of the balance (zero area, no inflow).
    pub skipped: Vec<String>,
}

/// Serializable form of a run for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub name: &'a str,
    pub precipitation_mm: f64,
    pub etp_mm: f64,
    pub rows: &'a [PartitionResult],
    pub total: &'a SystemTotal,
    pub presentation: Presentation,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub skipped: &'a [String],
}

impl RunResponse {
    pub fn report(&self) -> RunReport<'_> {
        RunReport {
            name: &self.scenario_name,
            precipitation_mm: self.study.precipitation(),
            etp_mm: self.study.etp(),
            rows: self.balance.rows(),
            total: self.balance.total(),
            presentation: self.balance.presentation(),
            skipped: &self.skipped,
        }
    }
}

impl RunReport<'_> {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Where a table goes once it is computed.
enum Sink {
    Top,
    Measure(usize),
}

/// Collects tables either at the top level or in the inbox of a measure.
struct Router {
    top: Vec<ResultTable>,
    inboxes: Vec<Vec<ResultTable>>,
}

impl Router {
    fn new(measures: usize) -> Self {
        Self {
            top: Vec::new(),
            inboxes: (0..measures).map(|_| Vec::new()).collect(),
        }
    }

    fn send(&mut self, sink: Sink, table: ResultTable) {
        match sink {
            Sink::Top => self.top.push(table),
            Sink::Measure(idx) => self.inboxes[idx].push(table),
        }
    }
}

fn sink_of(target: Option<&String>, positions: &HashMap<&str, usize>) -> Sink {
    target
        .and_then(|t| positions.get(t.as_str()).copied())
        .map_or(Sink::Top, Sink::Measure)
}

/// Run a scenario through every element and measure.
///
/// Each element table goes to the measure named by its `connect_to`, or to
/// the top level. Measures are composed in declaration order, so a measure
/// has received all of its inflow when its turn comes.
pub fn run_scenario(scenario: &Scenario) -> AppResult<RunResponse> {
    validate_scenario(scenario)?;
    let study = scenario.climate.study_area()?;
    info!(
        scenario = scenario.name.as_str(),
        precipitation = study.precipitation(),
        etp = study.etp(),
        elements = scenario.elements.len(),
        measures = scenario.measures.len(),
        "running scenario"
    );

    let positions: HashMap<&str, usize> = scenario
        .measures
        .iter()
        .enumerate()
        .map(|(idx, m)| (m.id.as_str(), idx))
        .collect();

    let mut skipped = Vec::new();
    let mut elements: Vec<(Box<dyn SurfaceElement>, Sink)> = Vec::new();
    for def in &scenario.elements {
        if def.area() == Some(0.0) {
            info!(element = def.id.as_str(), "zero area, skipped");
            skipped.push(def.id.clone());
            continue;
        }
        let element = def.kind.build(&def.id, &def.params)?;
        elements.push((element, sink_of(def.connect_to.as_ref(), &positions)));
    }

    let measures = scenario
        .measures
        .iter()
        .map(|def| def.kind.build(&def.id, &def.params))
        .collect::<Result<Vec<Box<dyn Measure>>, _>>()?;

    let mut router = Router::new(measures.len());
    for (element, sink) in elements {
        router.send(sink, element.evaluate(&study)?);
    }

    for (idx, (measure, def)) in measures.iter().zip(&scenario.measures).enumerate() {
        let upstream = std::mem::take(&mut router.inboxes[idx]);
        if upstream.is_empty() {
            warn!(measure = measure.name(), "no inflow, measure skipped");
            skipped.push(def.id.clone());
            continue;
        }
        let table = measure.compose(&study, &upstream)?;
        router.send(sink_of(def.connect_to.as_ref(), &positions), table);
    }

    let balance = watbal(&router.top)?;
    let clamped = balance.clamped_rows().count();
    info!(
        scenario = scenario.name.as_str(),
        rows = balance.rows().len(),
        clamped,
        skipped = skipped.len(),
        "scenario complete"
    );

    Ok(RunResponse {
        scenario_name: scenario.name.clone(),
        study,
        balance,
        skipped,
    })
}

/// Load a scenario file and run it.
pub fn run_file(path: &Path) -> AppResult<RunResponse> {
    let scenario = project_service::load_scenario(path)?;
    run_scenario(&scenario)
}
