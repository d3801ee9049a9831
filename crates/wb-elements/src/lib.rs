//! wb-elements: partition formulas of surface elements and measures.
//!
//! Surface elements turn precipitation on their own area into a
//! (a, g, v) partition. Measures receive the runoff of upstream result
//! tables and partition it again.
//!
//! All elements implement either `SurfaceElement` or `Measure`, validate
//! their parameters on construction and are pure functions of the
//! `StudyArea` climate afterwards.
//!
//! # Example
//!
//! ```no_run
//! use wb_climate::StudyArea;
//! use wb_core::units::sqm;
//! use wb_elements::{InfiltrationSwale, Measure, Roof, SurfaceElement};
//!
//! let study = StudyArea::new(800.0, 500.0).unwrap();
//! let roof = Roof::new("Roof", sqm(1000.0), Roof::STANDARD_SP).unwrap();
//! let swale = InfiltrationSwale::new("Swale", 100.0, None).unwrap();
//!
//! let roof_table = roof.evaluate(&study).unwrap();
//! let chain = swale.compose(&study, &[roof_table]).unwrap();
//! println!("{} rows", chain.len());
//! ```

pub mod common;
pub mod measure;
pub mod registry;
pub mod surface;
pub mod traits;

pub use measure::{
    Drainage, DrainageType, InfiltrationSwale, PondSystem, RainwaterUsage, SurfaceInfiltration,
    SwaleTrench, SwaleTrenchSystem,
};
pub use registry::{ElementKind, MeasureKind, ParamDefault, ParamSpec, ParamValue, ParamValues};
pub use surface::{
    FlatArea, Garden, GardenSlope, GravelCover, GreenRoof, GreenRoofShallow, PaverStonegrid,
    PermeableSurface, PorousSurface, Roof, StorageRoof,
};
pub use traits::{Measure, SurfaceElement};
