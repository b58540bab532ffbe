use crate::scoring::RiskAssessment;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DAILY_RISK_FILE: &str = "daily_city_risk.csv";
pub const ALERTS_FILE: &str = "alerts_today.csv";

const DAILY_RISK_COLUMNS: [&str; 13] = [
    "date",
    "city",
    "city_tier",
    "traffic_risk",
    "weather_risk",
    "demand_risk",
    "risk_score",
    "risk_classification",
    "congestion_level",
    "congestion_level_7d_avg",
    "rainfall_mm",
    "temperature",
    "demand_index",
];

const ALERT_COLUMNS: [&str; 9] = [
    "date",
    "city",
    "city_tier",
    "risk_score",
    "risk_classification",
    "traffic_risk",
    "weather_risk",
    "demand_risk",
    "alert_reason",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub daily_risk: PathBuf,
    pub alerts: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Writes the daily risk table and the alert table into `dir`, creating it if
/// needed. Both files always carry a header row, even when empty.
///
/// Each table is staged under a hidden temporary name and only renamed into place
/// once both were written, so a failed run leaves the previous pair untouched.
pub fn write_outputs<P: AsRef<Path>>(
    dir: P,
    assessment: &RiskAssessment,
) -> Result<OutputPaths, OutputError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = OutputPaths {
        daily_risk: dir.join(DAILY_RISK_FILE),
        alerts: dir.join(ALERTS_FILE),
    };

    let staged_daily = staging_path(dir, DAILY_RISK_FILE);
    let staged_alerts = staging_path(dir, ALERTS_FILE);

    let staged = write_table(&staged_daily, &DAILY_RISK_COLUMNS, &assessment.scored)
        .and_then(|_| write_table(&staged_alerts, &ALERT_COLUMNS, &assessment.alerts));
    if let Err(err) = staged {
        let _ = fs::remove_file(&staged_daily);
        let _ = fs::remove_file(&staged_alerts);
        return Err(err);
    }

    promote(&staged_daily, &paths.daily_risk)?;
    promote(&staged_alerts, &paths.alerts)?;

    info!(
        daily_risk = %paths.daily_risk.display(),
        alerts = %paths.alerts.display(),
        rows = assessment.scored.len(),
        alert_rows = assessment.alerts.len(),
        "risk outputs written"
    );

    Ok(paths)
}

fn staging_path(dir: &Path, file: &str) -> PathBuf {
    dir.join(format!(".{}.tmp", file))
}

fn promote(staged: &Path, target: &Path) -> Result<(), OutputError> {
    fs::rename(staged, target).map_err(|source| {
        let _ = fs::remove_file(staged);
        OutputError::Io {
            path: target.to_path_buf(),
            source,
        }
    })
}

fn write_table<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<(), OutputError> {
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;

    writer.write_record(columns).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }

    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureRecord;
    use crate::scoring::RiskEngine;
    use chrono::NaiveDate;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ops-risk-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn monsoon_record() -> FeatureRecord {
        FeatureRecord {
            date: NaiveDate::from_ymd_opt(2024, 7, 15).expect("valid date"),
            city: "Mumbai".to_string(),
            city_tier: None,
            congestion_level: Some(0.85),
            congestion_level_7d_avg: Some(0.70),
            rainfall_mm: Some(42.5),
            temperature: Some(29.0),
            demand_index: Some(0.60),
        }
    }

    #[test]
    fn writes_both_tables_with_headers() {
        let dir = scratch_dir("writes-both");
        let assessment = RiskEngine::default().assess(&[monsoon_record()]);

        let paths = write_outputs(&dir, &assessment).expect("outputs written");

        let daily = fs::read_to_string(&paths.daily_risk).expect("daily table");
        let mut lines = daily.lines();
        assert_eq!(lines.next(), Some(DAILY_RISK_COLUMNS.join(",").as_str()));
        let row = lines.next().expect("one scored row");
        assert!(row.starts_with("2024-07-15,Mumbai,Tier 1,"));
        assert!(row.contains(",66.1,High,"));

        let alerts = fs::read_to_string(&paths.alerts).expect("alerts table");
        assert!(alerts.starts_with(&ALERT_COLUMNS.join(",")));
        assert!(alerts.contains(",High traffic congestion (0.85); Heavy rainfall (42.5mm)"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_assessment_still_writes_headers() {
        let dir = scratch_dir("empty");
        let assessment = RiskEngine::default().assess(&[]);

        let paths = write_outputs(&dir, &assessment).expect("outputs written");

        let alerts = fs::read_to_string(&paths.alerts).expect("alerts table");
        assert_eq!(alerts.trim_end(), ALERT_COLUMNS.join(","));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_alert_table_keeps_the_previous_outputs() {
        let dir = scratch_dir("staged");
        fs::create_dir_all(&dir).expect("scratch dir");
        fs::write(dir.join(DAILY_RISK_FILE), "stale daily\n").expect("stale daily");
        fs::write(dir.join(ALERTS_FILE), "stale alerts\n").expect("stale alerts");
        // A directory where the staged alert table should go makes that write fail.
        fs::create_dir_all(staging_path(&dir, ALERTS_FILE)).expect("blocking dir");
        let assessment = RiskEngine::default().assess(&[monsoon_record()]);

        let error = write_outputs(&dir, &assessment).expect_err("alert table cannot be staged");

        assert!(matches!(error, OutputError::Csv { .. } | OutputError::Io { .. }));
        assert_eq!(
            fs::read_to_string(dir.join(DAILY_RISK_FILE)).expect("daily kept"),
            "stale daily\n"
        );
        assert_eq!(
            fs::read_to_string(dir.join(ALERTS_FILE)).expect("alerts kept"),
            "stale alerts\n"
        );
        assert!(!staging_path(&dir, DAILY_RISK_FILE).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn successful_run_leaves_no_staging_files() {
        let dir = scratch_dir("no-staging");
        let assessment = RiskEngine::default().assess(&[monsoon_record()]);

        write_outputs(&dir, &assessment).expect("outputs written");

        let leftovers: Vec<_> = fs::read_dir(&dir)
            .expect("dir listing")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
