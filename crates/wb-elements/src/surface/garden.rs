//! Gardens and unpaved green areas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wb_climate::StudyArea;
use wb_core::units::Area;
use wb_core::{WbError, WbResult, validate};
use wb_results::Partition;

use crate::common::check_area;
use crate::traits::SurfaceElement;

/// Terrain slope class selecting the standard garden partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GardenSlope {
    Low,
    #[default]
    Medium,
    Steep,
}

impl GardenSlope {
    pub const ALL: [GardenSlope; 3] = [GardenSlope::Low, GardenSlope::Medium, GardenSlope::Steep];

    /// Standard (a, g, v).
    pub fn fractions(self) -> (f64, f64, f64) {
        match self {
            GardenSlope::Low => (0.1, 0.3, 0.6),
            GardenSlope::Medium => (0.2, 0.2, 0.6),
            GardenSlope::Steep => (0.3, 0.1, 0.6),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            GardenSlope::Low => "low",
            GardenSlope::Medium => "medium",
            GardenSlope::Steep => "steep",
        }
    }
}

impl fmt::Display for GardenSlope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GardenSlope {
    type Err = WbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase();
        GardenSlope::ALL
            .into_iter()
            .find(|slope| slope.id() == folded)
            .ok_or_else(|| WbError::unknown_category("garden slope class", s))
    }
}

/// Garden or green area with a directly given partition.
///
/// The fractions are taken as supplied. Each is range-checked; whether they
/// add up to one is checked by the scenario layer before a run.
#[derive(Debug, Clone)]
pub struct Garden {
    name: String,
    area: Area,
    pub a: f64,
    pub g: f64,
    pub v: f64,
}

impl Garden {
    pub fn new(name: impl Into<String>, area: Area, a: f64, g: f64, v: f64) -> WbResult<Self> {
        Ok(Self {
            name: name.into(),
            area: check_area(area)?,
            a: validate(a, "a_garden")?,
            g: validate(g, "g_garden")?,
            v: validate(v, "v_garden")?,
        })
    }

    pub fn with_slope(name: impl Into<String>, area: Area, slope: GardenSlope) -> WbResult<Self> {
        let (a, g, v) = slope.fractions();
        Self::new(name, area, a, g, v)
    }

    /// Sum of the supplied fractions, rounded to two decimals.
    pub fn fraction_sum(&self) -> f64 {
        wb_core::round_to(self.a + self.g + self.v, 2)
    }
}

impl SurfaceElement for Garden {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.area
    }

    fn partition(&self, _study: &StudyArea) -> WbResult<Partition> {
        Ok(Partition::new(self.a, self.g, self.v, 0.0))
    }
}
