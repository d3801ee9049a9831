use thiserror::Error;

pub type WbResult<T> = Result<T, WbError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WbError {
    /// A parameter lies outside the validity range of its regression.
    #[error("{label} is not valid. Valid range: {min} - {max} {unit}")]
    Range {
        param: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        unit: &'static str,
        value: f64,
    },

    /// A discrete input matched none of the accepted categories.
    #[error("Unknown {what}: '{value}'")]
    UnknownCategory { what: &'static str, value: String },

    /// The run as a whole is malformed (no elements, bad garden fractions, ...).
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("No validity range registered for parameter '{name}'")]
    UnknownParameter { name: String },
}

impl WbError {
    pub fn configuration(message: impl Into<String>) -> Self {
        WbError::Configuration {
            message: message.into(),
        }
    }

    pub fn unknown_category(what: &'static str, value: impl Into<String>) -> Self {
        WbError::UnknownCategory {
            what,
            value: value.into(),
        }
    }

    /// True for errors the user fixes by editing a numeric value.
    pub fn is_range(&self) -> bool {
        matches!(self, WbError::Range { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_display() {
        let err = WbError::Range {
            param: "P",
            label: "Precipitation",
            min: 500.0,
            max: 1700.0,
            unit: "mm/a",
            value: 450.0,
        };
        assert_eq!(
            err.to_string(),
            "Precipitation is not valid. Valid range: 500 - 1700 mm/a"
        );
        assert!(err.is_range());
    }

    #[test]
    fn unknown_category_display() {
        let err = WbError::unknown_category("drainage type", "Pip3");
        assert!(err.to_string().contains("Pip3"));
        assert!(!err.is_range());
    }
}
