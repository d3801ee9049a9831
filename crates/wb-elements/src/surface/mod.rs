//! Surface elements (DWA-A 102 appendix A).

pub mod garden;
pub mod green_roof;
pub mod pavement;
pub mod roof;

pub use garden::{Garden, GardenSlope};
pub use green_roof::{GreenRoof, GreenRoofShallow};
pub use pavement::{GravelCover, PaverStonegrid, PermeableSurface, PorousSurface};
pub use roof::{FlatArea, Roof, StorageRoof};
