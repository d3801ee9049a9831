//! System-level water balance over a completed run.

use serde::Serialize;
use wb_core::{WbError, WbResult};

use crate::table::ResultTable;
use crate::types::{Partition, PartitionResult};

/// Summed areas and volumes of a run and the fractions derived from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SystemTotal {
    pub area_m2: f64,
    pub vp_m3: f64,
    pub va_m3: f64,
    pub vg_m3: f64,
    pub vv_m3: f64,
    pub ve_m3: f64,
    pub a: f64,
    pub g: f64,
    pub v: f64,
    pub e: f64,
}

impl SystemTotal {
    fn from_rows<'a>(rows: impl Iterator<Item = &'a PartitionResult>) -> WbResult<Self> {
        let mut total = SystemTotal::default();
        let mut count = 0usize;
        for row in rows {
            total.area_m2 += row.area_m2;
            total.vp_m3 += row.vp_m3;
            total.va_m3 += row.va_m3;
            total.vg_m3 += row.vg_m3;
            total.vv_m3 += row.vv_m3;
            total.ve_m3 += row.ve_m3;
            count += 1;
        }

        if count == 0 {
            return Err(WbError::configuration("no result rows to balance"));
        }
        if total.vp_m3 <= 0.0 {
            return Err(WbError::configuration(
                "total precipitation volume of the system is zero",
            ));
        }

        // Ratios are always re-derived from the summed volumes.
        total.a = total.va_m3 / total.vp_m3;
        total.g = total.vg_m3 / total.vp_m3;
        total.v = total.vv_m3 / total.vp_m3;
        total.e = total.ve_m3 / total.vp_m3;
        Ok(total)
    }

    pub fn partition(&self) -> Partition {
        Partition::new(self.a, self.g, self.v, self.e)
    }
}

/// Every row of a run followed by the system summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterBalance {
    rows: Vec<PartitionResult>,
    total: SystemTotal,
}

impl WaterBalance {
    /// Label of the summary row.
    pub const SYSTEM_LABEL: &'static str = "System";

    pub fn rows(&self) -> &[PartitionResult] {
        &self.rows
    }

    pub fn total(&self) -> &SystemTotal {
        &self.total
    }

    /// True if any row carries a withdrawal term.
    pub fn has_withdrawal(&self) -> bool {
        self.rows.iter().any(|r| r.e != 0.0) || self.total.e != 0.0
    }

    pub fn clamped_rows(&self) -> impl Iterator<Item = &PartitionResult> {
        self.rows.iter().filter(|r| r.conservation_clamped)
    }
}

/// Sum area and volumes over every row of every table and append the
/// system row.
///
/// Upstream rows routed through a measure are still present with `Va = 0`,
/// so summing all rows (not only outflow rows) counts each volume once.
pub fn watbal(tables: &[ResultTable]) -> WbResult<WaterBalance> {
    let total = SystemTotal::from_rows(tables.iter().flat_map(ResultTable::iter))?;
    let rows: Vec<PartitionResult> = tables
        .iter()
        .flat_map(ResultTable::iter)
        .cloned()
        .collect();

    tracing::info!(
        rows = rows.len(),
        vp = total.vp_m3,
        a = total.a,
        g = total.g,
        v = total.v,
        e = total.e,
        "system water balance"
    );

    Ok(WaterBalance { rows, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Inflow, compose};
    use wb_climate::StudyArea;

    fn surface(name: &str, area: f64, p: Partition) -> ResultTable {
        ResultTable::single(PartitionResult::surface(
            name,
            area,
            &StudyArea::default(),
            p,
        ))
    }

    #[test]
    fn single_surface_keeps_its_fractions() {
        let t = surface("Roof", 1000.0, Partition::impervious(0.9));
        let wb = watbal(&[t]).unwrap();
        let total = wb.total();
        assert!((total.a - 0.9).abs() < 1e-12);
        assert!((total.v - 0.1).abs() < 1e-12);
        assert_eq!(total.g, 0.0);
        assert!(!wb.has_withdrawal());
        assert!(total.partition().is_conserved());
    }

    #[test]
    fn routed_runoff_is_not_double_counted() {
        let study = StudyArea::default();
        let roof = surface("Roof", 1000.0, Partition::impervious(0.9));
        let upstream = [roof];
        let inflow = Inflow::collect(&upstream);
        let row = PartitionResult::measure(
            "Swale",
            0.0,
            inflow.contributing_area_m2,
            inflow.runoff_volume_m3,
            &study,
            Partition::new(0.0, 0.9, 0.1, 0.0),
        );
        let chain = compose(&upstream, row);
        let wb = watbal(&[chain]).unwrap();
        let total = wb.total();
        assert!((total.vp_m3 - 800.0).abs() < 1e-9);
        assert_eq!(total.va_m3, 0.0);
        assert!((total.vg_m3 - 648.0).abs() < 1e-9);
        assert!(total.partition().is_conserved());
    }

    #[test]
    fn empty_run_is_a_configuration_error() {
        assert!(matches!(
            watbal(&[]),
            Err(WbError::Configuration { .. })
        ));
    }

    #[test]
    fn withdrawal_is_detected() {
        let t = surface("Tank", 100.0, Partition::new(0.5, 0.0, 0.1, 0.4));
        assert!(watbal(&[t]).unwrap().has_withdrawal());
    }
}
