use polars::prelude::*;
use tracing::debug;

use crate::config::FieldGeometry;
use crate::exprs::{finite_or_null, mean_ignoring_nulls};
use crate::schema::{inflow, input};
use crate::units::*;

/// Append the applied-water columns derived from bucket-fill timings.
///
/// Reads `reading_1`, `reading_2` and `irr_time`. Each step is its own
/// `with_columns` so it can refer to the column added just before it.
pub fn apply(lf: LazyFrame, geometry: &FieldGeometry) -> LazyFrame {
    let acreage_row = geometry.acreage_row();
    debug!(
        bucket_size_l = geometry.bucket_size_l,
        acreage_row, "inflow stage"
    );

    lf.with_columns([
        mean_ignoring_nulls(&[input::READING_1, input::READING_2]).alias(inflow::AVG_SEC),
    ])
    .with_columns([finite_or_null(
        lit(geometry.bucket_size_l) / col(inflow::AVG_SEC)
            * lit(SECONDS_PER_MINUTE)
            * lit(GALLONS_PER_LITER),
    )
    .alias(inflow::AVG_GPM)])
    .with_columns([
        (col(inflow::AVG_GPM) * col(input::IRR_TIME) * lit(MINUTES_PER_HOUR))
            .alias(inflow::GAL_TRT),
    ])
    .with_columns([(col(inflow::GAL_TRT) * lit(ACRE_FEET_PER_GALLON)).alias(inflow::ACREFT_TRT)])
    .with_columns([(col(inflow::ACREFT_TRT) * lit(INCHES_PER_FOOT)).alias(inflow::ACREIN_TRT)])
    .with_columns([
        finite_or_null(col(inflow::ACREIN_TRT) / lit(acreage_row)).alias(inflow::IN_TRT),
    ])
    // Divides, as recorded in the trial workbook; infiltration.mm multiplies.
    .with_columns([(col(inflow::IN_TRT) / lit(MM_PER_INCH)).alias(inflow::MM_TRT)])
}
