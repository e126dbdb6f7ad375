use polars::prelude::*;
use tracing::debug;

use crate::exprs::finite_or_null;
use crate::schema::{infiltration, inflow, input, outflow};
use crate::units::MM_PER_INCH;

/// Append net infiltration and the zero-deep-percolation efficiency.
///
/// `bad_eff` treats every infiltrated inch as beneficially used. Deep
/// percolation is never zero on these furrows, so the column overstates
/// application efficiency and must not be reported as one.
pub fn apply(lf: LazyFrame) -> LazyFrame {
    debug!("infiltration stage");

    lf.with_columns([
        (col(inflow::IN_TRT) - col(outflow::IN_TRT)).alias(infiltration::DEPTH_IN),
    ])
    .with_columns([(col(infiltration::DEPTH_IN) * lit(MM_PER_INCH)).alias(infiltration::DEPTH_MM)])
    .with_columns([
        finite_or_null(col(infiltration::DEPTH_MM) / col(input::IRR_TIME))
            .alias(infiltration::RATE_MMHR),
        finite_or_null(
            (lit(1.0) - col(outflow::IN_TRT) / col(inflow::IN_TRT)) * lit(100.0),
        )
        .alias(infiltration::BAD_EFF),
    ])
}
