use polars::prelude::*;
use tracing::{debug, info};

use crate::config::{FieldGeometry, InputConfig};
use crate::error::FlowError;
use crate::outflow::RunoffTiming;
use crate::schema::input;
use crate::table::{parse_float_columns, require_columns};
use crate::{infiltration, inflow, outflow};

/// Inflow → outflow → infiltration over one observation table, followed by
/// pruning of all-missing columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaterBalance {
    geometry: FieldGeometry,
}

impl WaterBalance {
    pub fn new(geometry: FieldGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    /// Run every stage and return the pruned table.
    ///
    /// A missing required column is the only fatal condition; numeric edge
    /// cases become missing values in the affected rows.
    pub fn compute(&self, observations: DataFrame) -> Result<DataFrame, FlowError> {
        require_columns(&observations, &input::REQUIRED)?;
        let runoff_timing = RunoffTiming::detect(&observations);
        // Tables that were not loaded through `load_observations` may still
        // hold text readings; the default null tokens apply to them.
        let null_tokens = InputConfig::default().null_values;
        let observations = parse_float_columns(observations, &input::NUMERIC, &null_tokens)?;

        let lf = inflow::apply(observations.lazy(), &self.geometry);
        let lf = outflow::apply(lf, &self.geometry, runoff_timing);
        let lf = infiltration::apply(lf);
        let df = lf.collect()?;

        let df = prune_empty_columns(df)?;
        info!(rows = df.height(), columns = df.width(), "water balance computed");
        Ok(df)
    }
}

/// Drop every column whose values are missing in all rows.
///
/// A table with no rows is returned as is.
pub fn prune_empty_columns(df: DataFrame) -> Result<DataFrame, FlowError> {
    let height = df.height();
    if height == 0 {
        return Ok(df);
    }

    let mut keep: Vec<PlSmallStr> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        if column.null_count() == height {
            debug!(column = %column.name(), "dropping all-missing column");
        } else {
            keep.push(column.name().clone());
        }
    }

    if keep.len() == df.width() {
        return Ok(df);
    }
    Ok(df.select(keep)?)
}
