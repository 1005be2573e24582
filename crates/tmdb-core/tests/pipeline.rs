use anyhow::Result;
use tmdb_core::{MovieMetricsPipeline, PipelineConfig, PipelineError};
use tmdb_parser::parse_movies_csv;

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tmdb-parser/tests/data")
        .join(name);
    std::fs::read_to_string(path).expect("read fixture")
}

fn strings(df: &polars::prelude::DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

#[test]
fn sample_dataset_produces_full_report() -> Result<()> {
    let raw = parse_movies_csv(&fixture("tmdb_sample.csv"))?;
    let report = MovieMetricsPipeline::default().run(&raw)?;

    // "Undated Short" has no release date
    assert_eq!(report.cleaned.height(), 4);
    assert_eq!(report.cleaned.column("runtime")?.null_count(), 0);

    // runtime median over 162, 169, 95, 12 is computed before rows are dropped
    let runtime = report.cleaned.column("runtime")?.f64()?;
    assert_eq!(runtime.get(2), Some(128.5));

    assert_eq!(
        strings(&report.missing_values, "column"),
        vec!["runtime", "release_date", "homepage"]
    );
    let missing: Vec<i64> = report
        .missing_values
        .column("missing")?
        .i64()?
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(missing, vec![1, 1, 3]);

    let genre_total: usize = 4 + 3 + 1 + 2;
    assert_eq!(report.genre_rows.height(), genre_total);

    assert_eq!(
        strings(&report.top_roi, "title"),
        vec![
            "Shoestring",
            "Avatar",
            "Pirates of the Caribbean: At World's End",
            "Quiet, Please"
        ]
    );
    assert_eq!(strings(&report.top_popularity, "title")[0], "Avatar");
    assert_eq!(strings(&report.top_budget, "title")[0], "Pirates of the Caribbean: At World's End");

    let years: Vec<i32> = report
        .yearly
        .column("release_year")?
        .i32()?
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(years, vec![2007, 2009, 2010]);
    let avg_budget = report.yearly.column("avg_budget")?.f64()?;
    assert_eq!(avg_budget.get(2), Some(7500.0));

    assert_eq!(strings(&report.top_genres, "genre")[..2], ["Action", "Adventure"]);
    let genre_counts = report.top_genres.column("count_genre")?.i64()?;
    assert_eq!(genre_counts.get(0), Some(2));
    assert!(report.long_movies.height() == 0);

    assert_eq!(report.correlations.height(), 7);
    assert_eq!(report.tables().len(), 12);
    Ok(())
}

#[test]
fn configured_limits_shape_the_report() -> Result<()> {
    let raw = parse_movies_csv(&fixture("tmdb_sample.csv"))?;
    let config = PipelineConfig::from_toml_str(
        r#"
        top_roi = 2
        top_genres = 1
        long_runtime_minutes = 160.0
        correlation_features = ["budget", "revenue"]
        "#,
    )?;
    let report = MovieMetricsPipeline::new(config).run(&raw)?;

    assert_eq!(report.top_roi.height(), 2);
    assert_eq!(report.top_genres.height(), 1);
    assert_eq!(
        strings(&report.long_movies, "title"),
        vec!["Pirates of the Caribbean: At World's End", "Avatar"]
    );
    assert_eq!(report.correlations.width(), 3);
    Ok(())
}

#[test]
fn config_rejects_unknown_keys_and_empty_features() {
    assert!(matches!(
        PipelineConfig::from_toml_str("top_movies = 3"),
        Err(PipelineError::Toml(_))
    ));
    assert!(matches!(
        PipelineConfig::from_toml_str("correlation_features = []"),
        Err(PipelineError::Config(_))
    ));
    assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
}

#[test]
fn malformed_genre_cell_fails_the_whole_run() {
    let content = "title,budget,revenue,runtime,release_date,popularity,vote_average,vote_count,genres\n\
                   Good,100,200,90,2001-01-01,1.0,5.0,10,[]\n\
                   Bad,100,200,90,2001-01-01,1.0,5.0,10,\"[{'name': 'Drama'\"\n";
    let raw = parse_movies_csv(content).unwrap();
    let err = MovieMetricsPipeline::default().run(&raw).unwrap_err();
    assert!(matches!(err, PipelineError::Parse { row: 1, .. }));
}
