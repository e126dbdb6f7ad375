use polars::prelude::*;
use tracing::info;

use crate::error::FlowError;
use crate::schema::{infiltration, inflow, input, outflow, summary};
use crate::table::require_columns;

/// Metrics averaged across replicates, in output order.
pub const HEADLINE_METRICS: [&str; 6] = [
    inflow::IN_TRT,
    outflow::IN_TRT,
    infiltration::DEPTH_IN,
    infiltration::DEPTH_MM,
    infiltration::RATE_MMHR,
    infiltration::BAD_EFF,
];

/// Mean of each headline metric per plot and irrigation date.
///
/// Groups keep their first-appearance order. Means skip missing values;
/// metrics absent from `computed` are absent from the summary.
pub fn summarize(computed: &DataFrame) -> Result<DataFrame, FlowError> {
    require_columns(computed, &[input::PLOT, input::DATE])?;

    let schema = computed.schema().clone();
    let mut aggs = vec![len().alias(summary::N_OBS)];
    aggs.extend(
        HEADLINE_METRICS
            .iter()
            .filter(|&&name| schema.contains(name))
            .map(|&name| col(name).mean()),
    );

    let df = computed
        .clone()
        .lazy()
        .group_by_stable([col(input::PLOT), col(input::DATE)])
        .agg(aggs)
        .collect()?;

    info!(groups = df.height(), "summarized by plot and date");
    Ok(df)
}
