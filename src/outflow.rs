use polars::prelude::*;
use tracing::debug;

use crate::config::FieldGeometry;
use crate::exprs::finite_or_null;
use crate::schema::{input, outflow, runoff};
use crate::units::*;

/// Whether the observation table carries a `runoff_time` column at all.
///
/// Decided once for the whole table before any row is processed; a column
/// that exists but is missing on some rows still counts as recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunoffTiming {
    Recorded,
    NotRecorded,
}

impl RunoffTiming {
    pub fn detect(df: &DataFrame) -> Self {
        if df.schema().contains(input::RUNOFF_TIME) {
            Self::Recorded
        } else {
            Self::NotRecorded
        }
    }
}

/// Append the leaving-water columns derived from flume gallons, plus runoff
/// timing when it was recorded.
pub fn apply(lf: LazyFrame, geometry: &FieldGeometry, runoff_timing: RunoffTiming) -> LazyFrame {
    let acreage_row = geometry.acreage_row();
    debug!(?runoff_timing, "outflow stage");

    let lf = lf
        .with_columns([
            (col(input::OUTFLOW_GAL) * lit(ACRE_FEET_PER_GALLON)).alias(outflow::ACREFT_TRT),
        ])
        .with_columns([(col(outflow::ACREFT_TRT) * lit(INCHES_PER_FOOT)).alias(outflow::ACREIN_TRT)])
        .with_columns([
            finite_or_null(col(outflow::ACREIN_TRT) / lit(acreage_row)).alias(outflow::IN_TRT),
        ])
        .with_columns([(col(outflow::IN_TRT) / lit(MM_PER_INCH)).alias(outflow::MM_TRT)]);

    match runoff_timing {
        RunoffTiming::Recorded => lf
            .with_columns([(col(input::RUNOFF_TIME) / lit(MINUTES_PER_HOUR)).alias(runoff::TIME_HRS)])
            .with_columns([
                (col(input::IRR_TIME) - col(runoff::TIME_HRS)).alias(runoff::START_TIME_HR),
            ]),
        RunoffTiming::NotRecorded => lf,
    }
}
