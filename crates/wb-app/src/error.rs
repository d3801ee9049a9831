//! Error types for the wb-app service layer.

use std::path::PathBuf;

use wb_core::WbError;

/// Application error wrapping the errors of the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load scenario {path}: {message}")]
    ScenarioLoad { path: PathBuf, message: String },

    #[error("Failed to write scenario {path}: {message}")]
    ScenarioWrite { path: PathBuf, message: String },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    /// A domain error (range, category, configuration) aborting the run.
    #[error("{0}")]
    Balance(#[from] WbError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for wb-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<wb_project::ValidationError> for AppError {
    fn from(err: wb_project::ValidationError) -> Self {
        match err {
            wb_project::ValidationError::Parameter { source, .. } => AppError::Balance(source),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Export(err.to_string())
    }
}

impl AppError {
    /// The underlying domain error, if any.
    pub fn balance_error(&self) -> Option<&WbError> {
        match self {
            AppError::Balance(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn load(path: &std::path::Path, err: wb_project::ProjectError) -> Self {
        match err {
            wb_project::ProjectError::Validation(v) => v.into(),
            other => AppError::ScenarioLoad {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}
