//! Routing of upstream tables through a measure.
//!
//! A measure receives the outflow (last row) of each upstream table. The
//! composite table it returns holds every upstream row, in order, with the
//! routed runoff `Va` set to zero, followed by the measure's own row. The
//! fixed-fate volumes `Vp`, `Vg`, `Vv`, `Ve` of upstream rows are kept.

use crate::table::ResultTable;
use crate::types::PartitionResult;

/// Contributing area and runoff volume entering a measure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Inflow {
    pub contributing_area_m2: f64,
    pub runoff_volume_m3: f64,
}

impl Inflow {
    /// Sum `Au` and `Va` over the last row of every upstream table.
    pub fn collect(upstream: &[ResultTable]) -> Self {
        upstream
            .iter()
            .filter_map(ResultTable::last)
            .fold(Inflow::default(), |acc, row| Inflow {
                contributing_area_m2: acc.contributing_area_m2 + row.au_m2,
                runoff_volume_m3: acc.runoff_volume_m3 + row.va_m3,
            })
    }
}

/// Concatenate `upstream` with routed runoff zeroed, then append `measure_row`.
pub fn compose(upstream: &[ResultTable], measure_row: PartitionResult) -> ResultTable {
    let mut table = ResultTable::from_rows(
        upstream
            .iter()
            .flat_map(ResultTable::iter)
            .cloned()
            .map(|mut row| {
                row.va_m3 = 0.0;
                row
            })
            .collect(),
    );
    table.push(measure_row);
    table
}
