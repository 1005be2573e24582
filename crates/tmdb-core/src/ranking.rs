use polars::prelude::*;

use crate::columns::{numeric, require_numeric, row_limit};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

/// First `n` rows after a stable sort on the numeric column `by`.
///
/// Ties keep their input order and nulls (NaN included) sort last in either
/// direction, so ranking a ranked frame again with the same `n` returns it
/// unchanged.
pub fn top_n(df: &DataFrame, by: &str, n: usize, order: SortOrder) -> Result<DataFrame> {
    require_numeric(df, by)?;
    let options = SortMultipleOptions::default()
        .with_order_descending(order == SortOrder::Descending)
        .with_nulls_last(true)
        .with_maintain_order(true);

    let ranked = df
        .clone()
        .lazy()
        .sort_by_exprs([numeric(by)], options)
        .limit(row_limit(n))
        .collect()?;
    Ok(ranked)
}

/// Rows whose numeric `column` is strictly greater than `threshold`, in input order.
pub fn filter_above(df: &DataFrame, column: &str, threshold: f64) -> Result<DataFrame> {
    require_numeric(df, column)?;
    let kept = df
        .clone()
        .lazy()
        .filter(numeric(column).gt(lit(threshold)))
        .collect()?;
    Ok(kept)
}
