use crate::domain::{CityTier, FeatureRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

use super::FeatureImportError;

const ROLLING_CONGESTION_COLUMN: &str = "congestion_level_7d_avg";
const LEGACY_ROLLING_CONGESTION_COLUMN: &str = "congestion_level_avg7";

/// Which column supplies the 7-day congestion average. The canonical name wins
/// when a frame carries both spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RollingCongestion {
    Canonical,
    Legacy,
    Absent,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<FeatureRecord>, FeatureImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rolling = {
        let headers = csv_reader.headers()?;
        let has = |name: &str| headers.iter().any(|header| header.trim() == name);
        if has(ROLLING_CONGESTION_COLUMN) {
            RollingCongestion::Canonical
        } else if has(LEGACY_ROLLING_CONGESTION_COLUMN) {
            RollingCongestion::Legacy
        } else {
            RollingCongestion::Absent
        }
    };

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<FeatureCsvRow>().enumerate() {
        let row = row?;
        // Header occupies line 1.
        let line = index + 2;
        records.push(row.into_record(line, rolling)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct FeatureCsvRow {
    date: String,
    city: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city_tier: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    congestion_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    congestion_level_7d_avg: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    congestion_level_avg7: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rainfall_mm: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    temperature: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    demand_index: Option<String>,
}

impl FeatureCsvRow {
    fn into_record(
        self,
        line: usize,
        rolling: RollingCongestion,
    ) -> Result<FeatureRecord, FeatureImportError> {
        let date = parse_date(&self.date).ok_or_else(|| FeatureImportError::InvalidDate {
            line,
            value: self.date.clone(),
        })?;

        let city = self.city.split_whitespace().collect::<Vec<_>>().join(" ");
        if city.is_empty() {
            return Err(FeatureImportError::MissingKey {
                line,
                field: "city",
            });
        }

        let congestion_level = parse_number(line, "congestion_level", self.congestion_level);
        let congestion_level_7d_avg = match rolling {
            RollingCongestion::Canonical => {
                parse_number(line, ROLLING_CONGESTION_COLUMN, self.congestion_level_7d_avg)
            }
            RollingCongestion::Legacy => parse_number(
                line,
                LEGACY_ROLLING_CONGESTION_COLUMN,
                self.congestion_level_avg7,
            ),
            RollingCongestion::Absent => congestion_level,
        };

        Ok(FeatureRecord {
            date,
            city,
            city_tier: self.city_tier.as_deref().and_then(CityTier::from_label),
            congestion_level,
            congestion_level_7d_avg,
            rainfall_mm: parse_number(line, "rainfall_mm", self.rainfall_mm),
            temperature: parse_number(line, "temperature", self.temperature),
            demand_index: parse_number(line, "demand_index", self.demand_index),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Unparsable cells are treated as absent; the engine reports them as missing features.
fn parse_number(line: usize, column: &'static str, value: Option<String>) -> Option<f64> {
    let raw = value?;
    match raw.trim().parse::<f64>() {
        Ok(number) => Some(number),
        Err(_) => {
            debug!(line, column, value = %raw, "ignoring non-numeric feature cell");
            None
        }
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    // Offset timestamps keep their local calendar day.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|dt| dt.date())
}
