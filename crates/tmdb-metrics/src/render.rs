use std::path::Path;

use anyhow::Result;
use comfy_table::Table;
use polars::prelude::*;

fn selected_columns<'a>(df: &'a DataFrame, columns: &[&str]) -> Result<Vec<&'a Column>> {
    if columns.is_empty() {
        return Ok(df.get_columns().iter().collect());
    }
    columns
        .iter()
        .map(|name| df.column(name).map_err(Into::into))
        .collect()
}

fn format_cell(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_string(),
        AnyValue::StringOwned(text) => text.to_string(),
        AnyValue::Float64(v) => format!("{v:.4}"),
        AnyValue::Float32(v) => format!("{v:.4}"),
        AnyValue::List(series) => series
            .str()
            .map(|names| names.into_iter().flatten().collect::<Vec<_>>().join("|"))
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

fn rows(df: &DataFrame, columns: &[&Column]) -> Result<Vec<Vec<String>>> {
    let mut out = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|column| column.get(idx).map(format_cell))
            .collect::<PolarsResult<Vec<_>>>()?;
        out.push(row);
    }
    Ok(out)
}

fn header(columns: &[&Column]) -> Vec<String> {
    columns
        .iter()
        .map(|column| column.name().to_string())
        .collect()
}

pub fn print_table(name: &str, df: &DataFrame, columns: &[&str]) -> Result<()> {
    let selected = selected_columns(df, columns)?;

    let mut table = Table::new();
    table.set_header(header(&selected));
    for row in rows(df, &selected)? {
        table.add_row(row);
    }

    println!("\n{name} ({} rows)", df.height());
    println!("{table}");
    Ok(())
}

pub fn write_csv(path: &Path, df: &DataFrame) -> Result<()> {
    let selected = selected_columns(df, &[])?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header(&selected))?;
    for row in rows(df, &selected)? {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
