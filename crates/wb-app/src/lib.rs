//! Shared application service layer for the water balance tools.
//!
//! Frontends (the CLI today) go through this crate for loading scenarios,
//! running them and looking up climate data, so the orchestration lives in
//! one place.

pub mod climate_service;
pub mod error;
pub mod project_service;
pub mod run_service;

pub use climate_service::{NaturalRequest, NaturalResponse, natural_balance, resolve_climate};
pub use error::{AppError, AppResult};
pub use project_service::{ScenarioSummary, load_scenario, save_scenario, validate_file};
pub use run_service::{RunReport, RunResponse, run_file, run_scenario};
