use polars::prelude::*;

use crate::columns::{numeric, numeric_series, require_numeric};
use crate::error::{PipelineError, Result};

/// Pearson correlation of two numeric columns over the rows where both are
/// present. `None` for fewer than two such rows or a constant side.
pub fn pearson(df: &DataFrame, x: &str, y: &str) -> Result<Option<f64>> {
    require_numeric(df, x)?;
    require_numeric(df, y)?;

    let pairs = df
        .clone()
        .lazy()
        .select([numeric(x).alias("x"), numeric(y).alias("y")])
        .filter(col("x").is_not_null().and(col("y").is_not_null()))
        .collect()?;
    if pairs.height() < 2 {
        return Ok(None);
    }

    let dx = col("x") - col("x").mean();
    let dy = col("y") - col("y").mean();
    let sums = pairs
        .lazy()
        .select([
            (dx.clone() * dy.clone()).sum().alias("cov"),
            (dx.clone() * dx).sum().alias("var_x"),
            (dy.clone() * dy).sum().alias("var_y"),
        ])
        .collect()?;

    let sum = |name: &str| -> Result<f64> {
        Ok(sums.column(name)?.f64()?.get(0).unwrap_or(f64::NAN))
    };
    let denominator = (sum("var_x")? * sum("var_y")?).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Ok(None);
    }
    Ok(Some((sum("cov")? / denominator).clamp(-1.0, 1.0)))
}

/// One row per column that has at least one null: `column, missing`.
pub fn missing_value_counts(df: &DataFrame) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    let mut missing: Vec<i64> = Vec::new();

    for column in df.get_columns() {
        let nulls = column.null_count();
        if nulls > 0 {
            names.push(column.name().to_string());
            missing.push(nulls as i64);
        }
    }

    Ok(DataFrame::new(vec![
        Series::new("column".into(), names).into(),
        Series::new("missing".into(), missing).into(),
    ])?)
}

/// Summary statistics of numeric columns:
/// `column, count, mean, std, min, median, max`. `std` is the sample
/// standard deviation.
pub fn describe_numeric(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut names = Vec::with_capacity(columns.len());
    let mut counts = Vec::with_capacity(columns.len());
    let mut means = Vec::with_capacity(columns.len());
    let mut stds = Vec::with_capacity(columns.len());
    let mut mins = Vec::with_capacity(columns.len());
    let mut medians = Vec::with_capacity(columns.len());
    let mut maxes = Vec::with_capacity(columns.len());

    for &name in columns {
        let values = numeric_series(df, name)?;
        names.push(name.to_string());
        counts.push((values.len() - values.null_count()) as i64);
        means.push(values.mean());
        stds.push(values.std(1));
        mins.push(values.min::<f64>()?);
        medians.push(values.median());
        maxes.push(values.max::<f64>()?);
    }

    Ok(DataFrame::new(vec![
        Series::new("column".into(), names).into(),
        Series::new("count".into(), counts).into(),
        Series::new("mean".into(), means).into(),
        Series::new("std".into(), stds).into(),
        Series::new("min".into(), mins).into(),
        Series::new("median".into(), medians).into(),
        Series::new("max".into(), maxes).into(),
    ])?)
}

/// Square Pearson correlation matrix. The first column, `feature`, labels the
/// rows; the remaining columns follow `columns`. Undefined entries are null.
pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    if columns.is_empty() {
        return Err(PipelineError::Validation(
            "correlation matrix needs at least one column".into(),
        ));
    }

    let mut coefficients = vec![vec![None; columns.len()]; columns.len()];
    for (i, &x) in columns.iter().enumerate() {
        for (j, &y) in columns.iter().enumerate().skip(i) {
            let r = pearson(df, x, y)?;
            coefficients[i][j] = r;
            coefficients[j][i] = r;
        }
    }

    let mut output: Vec<Column> = Vec::with_capacity(columns.len() + 1);
    output.push(
        Series::new(
            "feature".into(),
            columns.iter().map(|name| name.to_string()).collect::<Vec<_>>(),
        )
        .into(),
    );
    for (&name, column) in columns.iter().zip(coefficients) {
        output.push(Series::new(name.into(), column).into());
    }

    Ok(DataFrame::new(output)?)
}
