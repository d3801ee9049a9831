//! wb-core: shared foundation for the water balance crates.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ranges (validity ranges of every regression parameter)
//! - error (shared error taxonomy)

pub mod error;
pub mod numeric;
pub mod ranges;
pub mod units;

pub use error::{WbError, WbResult};
pub use numeric::*;
pub use ranges::{ParameterRange, validate};
pub use units::*;
