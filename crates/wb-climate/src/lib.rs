//! wb-climate: climate context of a water balance run.
//!
//! Provides:
//! - the reference climate table of German cities (DWD 1991-2020)
//! - `StudyArea`, the validated (P, ETp) pair every formula reads
//! - a Bagrov estimate of the natural (undeveloped) water balance

pub mod bagrov;
pub mod catalog;
pub mod study_area;

pub use bagrov::{BagrovCurve, NaturalWaterBalance, bagrov_curve, natural_water_balance};
pub use catalog::{ClimateRecord, lookup, places};
pub use study_area::StudyArea;
