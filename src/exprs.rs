//! Expression helpers that keep "missing" flowing through derived columns.
//!
//! Polars nulls already propagate through arithmetic. These helpers cover the
//! two places where plain arithmetic would not give a missing value: averaging
//! with skipped nulls, and non-finite results from zero denominators.

use polars::prelude::*;

/// Null out any non-finite value (inf, -inf, NaN).
pub fn finite_or_null(expr: Expr) -> Expr {
    when(expr.clone().is_finite())
        .then(expr)
        .otherwise(lit(NULL).cast(DataType::Float64))
}

/// Row-wise mean of `columns`, skipping nulls. Null when every input is null.
pub fn mean_ignoring_nulls(columns: &[&str]) -> Expr {
    let mut sum = lit(0.0);
    let mut present = lit(0.0);
    for &name in columns {
        sum = sum + col(name).fill_null(lit(0.0));
        present = present + col(name).is_not_null().cast(DataType::Float64);
    }
    // 0 / 0 when nothing is present
    finite_or_null(sum / present)
}
