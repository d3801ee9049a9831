//! wb-results: tabular water balance results and their composition.
//!
//! - `Partition`: the (a, g, v, e) fractions a formula produces
//! - `PartitionResult` / `ResultTable`: labelled rows with areas and volumes
//! - `aggregate`: routing upstream tables through a measure
//! - `watbal`: the system-level summary over a whole run
//! - `present`: fixed column layout for renderers

pub mod aggregate;
pub mod present;
pub mod table;
pub mod types;
pub mod watbal;

pub use aggregate::{Inflow, compose};
pub use present::{Cell, Column, Presentation};
pub use table::ResultTable;
pub use types::{Partition, PartitionResult, RowRole};
pub use watbal::{SystemTotal, WaterBalance, watbal};
