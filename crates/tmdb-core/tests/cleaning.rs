use polars::prelude::*;

use tmdb_core::{
    clean, compute_roi, impute_runtime, parse_dates_and_filter, parse_genres, PipelineError,
};

fn raw_movies() -> DataFrame {
    df!(
        "title" => &["X", "Free Money", "Flop", "Undated", "Garbled"],
        "budget" => &[Some(1000.0f64), Some(0.0), Some(200.0), None, Some(50.0)],
        "revenue" => &[Some(5000.0f64), Some(5000.0), Some(50.0), Some(10.0), None],
        "runtime" => &[Some(100.0f64), None, Some(90.0), Some(140.0), None],
        "release_date" => &[Some("2010-05-01"), Some("2010-07-15"), Some("2011-01-02"), None, Some("not a date")],
        "popularity" => &[10.0f64, 5.0, 1.0, 0.5, 0.1],
        "vote_average" => &[7.0f64, 6.0, 3.0, 5.0, 4.0],
        "vote_count" => &[100i64, 50, 10, 1, 0],
        "genres" => &[
            Some("[{'id':1,'name':'Action'}]"),
            Some(r#"[{"id": 18, "name": "Drama"}, {"id": 28, "name": "Action"}]"#),
            None,
            Some("[]"),
            Some("[]"),
        ],
    )
    .unwrap()
}

#[test]
fn impute_runtime_uses_median_of_present_values() -> anyhow::Result<()> {
    let df = impute_runtime(&raw_movies())?;
    let runtime = df.column("runtime")?.f64()?;

    assert_eq!(runtime.null_count(), 0);
    // present values 100, 90, 140 -> median 100
    assert_eq!(runtime.get(1), Some(100.0));
    assert_eq!(runtime.get(4), Some(100.0));
    assert_eq!(runtime.get(2), Some(90.0));
    Ok(())
}

#[test]
fn impute_runtime_averages_middle_pair() -> anyhow::Result<()> {
    let df = df!(
        "runtime" => &[Some(80.0f64), None, Some(100.0), Some(120.0), Some(90.0)],
    )?;
    let imputed = impute_runtime(&df)?;
    assert_eq!(imputed.column("runtime")?.f64()?.get(1), Some(95.0));
    Ok(())
}

#[test]
fn impute_runtime_without_any_value_is_fatal() {
    let df = df!("runtime" => &[None::<f64>, None]).unwrap();
    let err = impute_runtime(&df).unwrap_err();
    assert!(matches!(err, PipelineError::MissingData(_)));
}

#[test]
fn parse_dates_drops_unparseable_rows_and_derives_year() -> anyhow::Result<()> {
    let df = parse_dates_and_filter(&raw_movies())?;

    assert_eq!(df.height(), 3);
    let titles: Vec<_> = df.column("title")?.str()?.into_iter().flatten().collect();
    assert_eq!(titles, vec!["X", "Free Money", "Flop"]);

    let years = df.column("release_year")?.i32()?;
    assert_eq!(years.null_count(), 0);
    assert_eq!(years.get(0), Some(2010));
    assert_eq!(years.get(2), Some(2011));

    assert_eq!(df.column("release_date")?.dtype(), &DataType::Date);
    Ok(())
}

#[test]
fn parse_dates_is_idempotent_on_parsed_frames() -> anyhow::Result<()> {
    let once = parse_dates_and_filter(&raw_movies())?;
    let twice = parse_dates_and_filter(&once)?;
    assert_eq!(twice.height(), once.height());
    assert_eq!(
        twice.column("release_year")?.i32()?.get(1),
        once.column("release_year")?.i32()?.get(1)
    );
    Ok(())
}

#[test]
fn compute_roi_matches_examples_and_stays_finite() -> anyhow::Result<()> {
    let df = compute_roi(&raw_movies())?;
    let roi = df.column("roi")?.f64()?;

    assert_eq!(roi.null_count(), 0);
    assert_eq!(roi.get(0), Some(4.0));
    assert_eq!(roi.get(1), Some(0.0));
    assert_eq!(roi.get(2), Some(-0.75));
    assert_eq!(roi.get(3), Some(0.0));
    assert_eq!(roi.get(4), Some(0.0));
    assert!(roi.into_iter().flatten().all(f64::is_finite));
    Ok(())
}

#[test]
fn roi_normalises_degenerate_arithmetic() -> anyhow::Result<()> {
    let df = df!(
        "budget" => &[Some(1000.0f64), Some(0.0), Some(-10.0), Some(f64::MIN_POSITIVE), Some(100.0), None, Some(100.0)],
        "revenue" => &[Some(5000.0f64), Some(5000.0), Some(5000.0), Some(f64::MAX), Some(f64::INFINITY), Some(10.0), Some(f64::NAN)],
    )?;
    let with_roi = compute_roi(&df)?;
    let roi: Vec<Option<f64>> = with_roi.column("roi")?.f64()?.into_iter().collect();
    assert_eq!(
        roi,
        vec![Some(4.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0)]
    );
    Ok(())
}

#[test]
fn compute_roi_accepts_integer_money_columns() -> anyhow::Result<()> {
    let df = df!(
        "budget" => &[200i64, 0],
        "revenue" => &[500i64, 100],
    )?;
    let roi = compute_roi(&df)?;
    assert_eq!(roi.column("roi")?.f64()?.get(0), Some(1.5));
    assert_eq!(roi.column("roi")?.f64()?.get(1), Some(0.0));
    Ok(())
}

#[test]
fn parse_dates_stores_calendar_dates() -> anyhow::Result<()> {
    let df = parse_dates_and_filter(&raw_movies())?;
    let first = df.column("release_date")?.get(0)?;
    assert_eq!(first.to_string(), "2010-05-01");
    Ok(())
}

#[test]
fn parse_genres_builds_ordered_lists() -> anyhow::Result<()> {
    let df = parse_genres(&raw_movies())?;
    let lists = df.column("genre_list")?.list()?;

    let names = |idx: usize| -> Vec<String> {
        lists
            .get_as_series(idx)
            .map(|s| {
                s.str()
                    .unwrap()
                    .into_iter()
                    .flatten()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    assert_eq!(names(0), vec!["Action"]);
    assert_eq!(names(1), vec!["Drama", "Action"]);
    assert!(names(2).is_empty());
    assert!(names(3).is_empty());
    Ok(())
}

#[test]
fn malformed_genres_abort_the_run() {
    let mut df = raw_movies();
    df.with_column(Series::new(
        "genres".into(),
        vec!["[]", "[{'id': 1, 'name': 'Action'", "[]", "[]", "[]"],
    ))
    .unwrap();

    let err = parse_genres(&df).unwrap_err();
    match err {
        PipelineError::Parse { row, title, .. } => {
            assert_eq!(row, 1);
            assert_eq!(title, "Free Money");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn clean_applies_every_stage() -> anyhow::Result<()> {
    let df = clean(&raw_movies())?;

    assert_eq!(df.height(), 3);
    assert_eq!(df.column("runtime")?.null_count(), 0);
    assert_eq!(df.column("release_year")?.null_count(), 0);
    assert_eq!(df.column("roi")?.null_count(), 0);
    assert!(df.column("genre_list").is_ok());
    Ok(())
}
