use polars::prelude::*;

use crate::columns::{
    numeric, require_column, require_numeric, row_limit, BUDGET, GENRE, RELEASE_YEAR, REVENUE,
};
use crate::error::Result;

pub const AVG_BUDGET: &str = "avg_budget";
pub const AVG_REVENUE: &str = "avg_revenue";
pub const MOVIE_COUNT: &str = "movie_count";

fn by_year(df: &DataFrame) -> Result<LazyGroupBy> {
    require_column(df, RELEASE_YEAR)?;
    Ok(df
        .clone()
        .lazy()
        .filter(col(RELEASE_YEAR).is_not_null())
        .group_by([col(RELEASE_YEAR).cast(DataType::Int32)]))
}

/// Mean budget and revenue per release year: `release_year, avg_budget, avg_revenue`.
///
/// Nulls are skipped. A year whose budgets and revenues are all null is dropped.
pub fn aggregate_by_year(df: &DataFrame) -> Result<DataFrame> {
    require_numeric(df, BUDGET)?;
    require_numeric(df, REVENUE)?;

    let yearly = by_year(df)?
        .agg([
            numeric(BUDGET).mean().alias(AVG_BUDGET),
            numeric(REVENUE).mean().alias(AVG_REVENUE),
        ])
        .filter(
            col(AVG_BUDGET)
                .is_not_null()
                .or(col(AVG_REVENUE).is_not_null()),
        )
        .sort([RELEASE_YEAR], SortMultipleOptions::default())
        .collect()?;
    Ok(yearly)
}

/// Number of movies per release year: `release_year, movie_count`.
pub fn releases_per_year(df: &DataFrame) -> Result<DataFrame> {
    let counts = by_year(df)?
        .agg([len().cast(DataType::Int64).alias(MOVIE_COUNT)])
        .sort([RELEASE_YEAR], SortMultipleOptions::default())
        .collect()?;
    Ok(counts)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreAgg {
    Mean,
    Count,
}

impl GenreAgg {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenreAgg::Mean => "mean",
            GenreAgg::Count => "count",
        }
    }

    /// Name of the aggregated column, e.g. `mean_vote_average`.
    pub fn output_column(&self, metric: &str) -> String {
        format!("{}_{}", self.as_str(), metric)
    }
}

/// Aggregates `metric` per genre over exploded genre rows and keeps the
/// `top_k` highest groups.
///
/// `Count` is the number of rows of each genre, whatever `metric` holds.
/// `Mean` needs a numeric column, skips its nulls, and drops genres with no
/// values. Ties keep the order in which the genres first appear.
pub fn genre_aggregate(
    genre_rows: &DataFrame,
    metric: &str,
    agg: GenreAgg,
    top_k: usize,
) -> Result<DataFrame> {
    require_column(genre_rows, GENRE)?;
    let output = agg.output_column(metric);

    let value = match agg {
        GenreAgg::Mean => {
            require_numeric(genre_rows, metric)?;
            numeric(metric).mean()
        }
        GenreAgg::Count => {
            require_column(genre_rows, metric)?;
            len().cast(DataType::Int64)
        }
    };

    let ranked = genre_rows
        .clone()
        .lazy()
        .filter(col(GENRE).is_not_null())
        .group_by_stable([col(GENRE)])
        .agg([value.alias(output.as_str())])
        .filter(col(output.as_str()).is_not_null())
        .sort(
            [output.as_str()],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(row_limit(top_k))
        .collect()?;
    Ok(ranked)
}
