//! Rainwater management measures (DWA-A 102 appendix B).

pub mod drainage;
pub mod infiltration;
pub mod pond;
pub mod rainwater;

pub use drainage::{Drainage, DrainageType};
pub use infiltration::{InfiltrationSwale, SurfaceInfiltration, SwaleTrench, SwaleTrenchSystem};
pub use pond::PondSystem;
pub use rainwater::RainwaterUsage;
