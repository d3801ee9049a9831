//! Core traits for surface elements and measures.

use tracing::debug;
use wb_climate::StudyArea;
use wb_core::WbResult;
use wb_core::units::{Area, as_sqm};
use wb_results::{Inflow, Partition, PartitionResult, ResultTable, compose};

use crate::common::warn_if_clamped;

/// An element that receives precipitation on its own area.
///
/// Implementations are deterministic functions of the climate and their
/// (already validated) parameters.
pub trait SurfaceElement: Send + Sync {
    /// Row label in result tables.
    fn name(&self) -> &str;

    fn area(&self) -> Area;

    /// Fractions of annual precipitation for the given climate.
    fn partition(&self, study: &StudyArea) -> WbResult<Partition>;

    /// Single-row result table of this element.
    fn evaluate(&self, study: &StudyArea) -> WbResult<ResultTable> {
        let p = self.partition(study)?;
        warn_if_clamped(self.name(), &p);
        debug!(
            element = self.name(),
            area = as_sqm(self.area()),
            a = p.a,
            g = p.g,
            v = p.v,
            "surface partition"
        );
        Ok(ResultTable::single(PartitionResult::surface(
            self.name(),
            as_sqm(self.area()),
            study,
            p,
        )))
    }
}

/// A downstream structure that partitions runoff routed into it.
pub trait Measure: Send + Sync {
    fn name(&self) -> &str;

    /// Fractions of the measure for the given climate and inflow.
    fn partition(&self, study: &StudyArea, inflow: &Inflow) -> WbResult<Partition>;

    /// Own surface of the measure receiving direct precipitation.
    ///
    /// Default is zero (pipes, tanks).
    fn footprint(&self, _inflow: &Inflow) -> Area {
        wb_core::units::sqm(0.0)
    }

    /// Route the last rows of `upstream` through this measure.
    ///
    /// The returned table holds every upstream row with `Va` zeroed, followed
    /// by the measure row.
    fn compose(&self, study: &StudyArea, upstream: &[ResultTable]) -> WbResult<ResultTable> {
        let inflow = Inflow::collect(upstream);
        let p = self.partition(study, &inflow)?;
        warn_if_clamped(self.name(), &p);

        let footprint = as_sqm(self.footprint(&inflow));
        debug!(
            measure = self.name(),
            upstream = upstream.len(),
            au = inflow.contributing_area_m2,
            inflow = inflow.runoff_volume_m3,
            footprint,
            a = p.a,
            g = p.g,
            v = p.v,
            e = p.e,
            "measure partition"
        );

        let row = PartitionResult::measure(
            self.name(),
            footprint,
            inflow.contributing_area_m2,
            inflow.runoff_volume_m3,
            study,
            p,
        );
        Ok(compose(upstream, row))
    }
}
