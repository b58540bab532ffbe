use ops_risk::domain::{CityTier, RiskClassification};
use ops_risk::ingest::FeatureFrameImporter;
use ops_risk::report::{write_outputs, ALERTS_FILE, DAILY_RISK_FILE};
use ops_risk::scoring::{RiskEngine, ScoringConfig};
use std::fs;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/daily_city_features.csv")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ops-risk-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn fixture_run_flags_monsoon_and_heatwave_cities() {
    let records = FeatureFrameImporter::from_path(fixture()).expect("fixture imports");
    let engine = RiskEngine::default();

    let assessment = engine.assess(&records);

    assert_eq!(assessment.scored.len(), 7);
    assert_eq!(assessment.rejected.len(), 1);
    assert_eq!(assessment.rejected[0].city, "Indore");
    assert_eq!(assessment.rejected[0].field, "demand_index");

    let cities: Vec<_> = assessment
        .alerts
        .iter()
        .map(|alert| alert.city.as_str())
        .collect();
    assert_eq!(cities, vec!["Mumbai", "Delhi"]);

    let mumbai = &assessment.alerts[0];
    assert_eq!(mumbai.city_tier, CityTier::Tier1);
    assert_eq!(mumbai.risk_score, 66.1);
    assert_eq!(
        mumbai.alert_reason,
        "High traffic congestion (0.85); Heavy rainfall (42.5mm)"
    );

    let delhi = &assessment.alerts[1];
    assert_eq!(
        delhi.alert_reason,
        "High traffic congestion (0.91); Heavy rainfall (16.0mm); High demand (0.82)"
    );

    let jaipur = assessment
        .scored
        .iter()
        .find(|row| row.city == "Jaipur" && Some(row.date) == assessment.alert_date)
        .expect("jaipur scored");
    assert_eq!(jaipur.risk_classification, RiskClassification::Low);

    let summary = assessment.summary();
    assert_eq!(summary.cities_monitored, 4);
    assert_eq!(summary.alert_count, 2);
    assert_eq!(summary.count_for(RiskClassification::High), 2);
    assert_eq!(summary.count_for(RiskClassification::Low), 1);
    assert_eq!(summary.rejected_rows, 1);
}

#[test]
fn outputs_round_trip_through_csv_files() {
    let records = FeatureFrameImporter::from_path(fixture()).expect("fixture imports");
    let assessment = RiskEngine::default().assess(&records);
    let dir = scratch_dir("outputs");

    let paths = write_outputs(&dir, &assessment).expect("outputs written");

    assert_eq!(paths.daily_risk, dir.join(DAILY_RISK_FILE));
    assert_eq!(paths.alerts, dir.join(ALERTS_FILE));

    let mut daily = csv::Reader::from_path(&paths.daily_risk).expect("daily table readable");
    let headers = daily.headers().expect("headers").clone();
    assert!(headers.iter().any(|column| column == "risk_classification"));
    assert_eq!(daily.records().count(), assessment.scored.len());

    let mut alerts = csv::Reader::from_path(&paths.alerts).expect("alerts readable");
    let reasons: Vec<String> = alerts
        .records()
        .map(|record| record.expect("alert row")[8].to_string())
        .collect();
    assert_eq!(reasons.len(), 2);
    assert!(reasons[0].contains("Heavy rainfall"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn stricter_rule_table_changes_the_alert_list() {
    let records = FeatureFrameImporter::from_path(fixture()).expect("fixture imports");
    let config = ScoringConfig::from_json(
        r#"{ "classification_bounds": { "low": 30.0, "medium": 67.0 } }"#,
    )
    .expect("override validates");
    let engine = RiskEngine::new(config).expect("engine builds");

    let assessment = engine.assess(&records);

    let cities: Vec<_> = assessment
        .alerts
        .iter()
        .map(|alert| alert.city.as_str())
        .collect();
    assert_eq!(cities, vec!["Delhi"]);
}

#[test]
fn explicit_alert_date_reports_the_earlier_day() {
    let records = FeatureFrameImporter::from_path(fixture()).expect("fixture imports");
    let date = chrono::NaiveDate::from_ymd_opt(2024, 7, 14).expect("valid date");

    let assessment = RiskEngine::default().assess_for_date(&records, Some(date));

    assert_eq!(assessment.alert_date, Some(date));
    assert!(assessment.alerts.iter().all(|alert| alert.date == date));
}
