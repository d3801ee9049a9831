//! Conveyance without treatment: pipes, channels and ditches.

use std::fmt;
use std::str::FromStr;

use wb_climate::StudyArea;
use wb_core::{WbError, WbResult};
use wb_results::{Inflow, Partition};

use crate::traits::Measure;

/// Drainage category resolved from a free-text type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainageType {
    /// Pipe, channel or steep ditch: everything leaves as runoff.
    Conveyance,
    /// Ditches with vegetation.
    Vegetated,
}

const CONVEYANCE: [&str; 6] = [
    "pipe",
    "rohr",
    "channel",
    "rinne",
    "steep ditch",
    "steiler graben",
];

const VEGETATED: [&str; 4] = [
    "ditch with vegetation",
    "shallow ditches with vegetation",
    "gräben mit bewuchs",
    "flache gräben mit bewuchs",
];

/// Trim, case-fold, collapse inner whitespace and spell out umlauts.
fn canonical(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue")
        .replace('ß', "ss")
}

impl DrainageType {
    pub const ALL: [DrainageType; 2] = [DrainageType::Conveyance, DrainageType::Vegetated];

    /// Accepted type names, English and German.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            DrainageType::Conveyance => &CONVEYANCE,
            DrainageType::Vegetated => &VEGETATED,
        }
    }

    pub fn parse(s: &str) -> WbResult<Self> {
        let key = canonical(s);
        DrainageType::ALL
            .into_iter()
            .find(|t| t.synonyms().iter().any(|syn| canonical(syn) == key))
            .ok_or_else(|| WbError::unknown_category("drainage type", s))
    }

    pub fn partition(self) -> Partition {
        match self {
            DrainageType::Conveyance => Partition::new(1.0, 0.0, 0.0, 0.0),
            DrainageType::Vegetated => Partition::new(0.7, 0.1, 0.2, 0.0),
        }
    }
}

impl FromStr for DrainageType {
    type Err = WbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrainageType::parse(s)
    }
}

impl fmt::Display for DrainageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.synonyms()[0])
    }
}

/// Drainage measure with a fixed partition per type and no own area.
#[derive(Debug, Clone)]
pub struct Drainage {
    name: String,
    pub drainage_type: DrainageType,
}

impl Drainage {
    pub fn new(name: impl Into<String>, drainage_type: DrainageType) -> Self {
        Self {
            name: name.into(),
            drainage_type,
        }
    }

    /// Resolve the type from its name; unknown names are an error.
    pub fn from_type_name(name: impl Into<String>, type_name: &str) -> WbResult<Self> {
        Ok(Self::new(name, DrainageType::parse(type_name)?))
    }
}

impl Measure for Drainage {
    fn name(&self) -> &str {
        &self.name
    }

    fn partition(&self, _study: &StudyArea, _inflow: &Inflow) -> WbResult<Partition> {
        Ok(self.drainage_type.partition())
    }
}
