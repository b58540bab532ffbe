use chrono::NaiveDate;
use ops_risk::domain::CityTier;
use ops_risk::ingest::{FeatureFrameImporter, FeatureImportError};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn fixture_frame_imports_every_row() {
    let records = FeatureFrameImporter::from_path(fixture("daily_city_features.csv"))
        .expect("fixture imports");

    assert_eq!(records.len(), 8);
    assert_eq!(
        records[0].date,
        NaiveDate::from_ymd_opt(2024, 7, 14).expect("valid date")
    );
    assert_eq!(records[0].city_tier, Some(CityTier::Tier1));
    assert_eq!(records[4].city, "Mumbai");
    assert_eq!(records[4].city_tier, None);
    assert_eq!(records[7].demand_index, None);
    assert_eq!(records[7].temperature, Some(31.0));
}

#[test]
fn pandas_style_timestamps_are_truncated_to_dates() {
    let csv = "date,city,congestion_level,congestion_level_7d_avg,rainfall_mm,temperature,demand_index\n\
2024-07-15 00:00:00,Pune,0.5,0.4,3.0,27.0,0.5\n";

    let records = FeatureFrameImporter::from_reader(csv.as_bytes()).expect("import succeeds");

    assert_eq!(
        records[0].date,
        NaiveDate::from_ymd_opt(2024, 7, 15).expect("valid date")
    );
}

#[test]
fn short_rows_are_rejected_as_csv_errors() {
    let csv = "date,city,congestion_level,rainfall_mm\n2024-07-15,Pune,0.5\n";

    let error = FeatureFrameImporter::from_reader(csv.as_bytes()).expect_err("ragged row");

    assert!(matches!(error, FeatureImportError::Csv(_)));
    assert!(error.to_string().starts_with("invalid feature CSV data"));
}
