use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Market tier of a city, carried through scoring as an annotation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityTier {
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
    Unknown,
}

impl CityTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Tier1, Self::Tier2, Self::Tier3, Self::Unknown]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses `Tier 1`, `tier1`, `TIER 2` and friends. `Unknown` and blanks yield `None`
    /// so callers can fall back to the configured tier map.
    pub fn from_label(value: &str) -> Option<Self> {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "tier1" | "1" => Some(Self::Tier1),
            "tier2" | "2" => Some(Self::Tier2),
            "tier3" | "3" => Some(Self::Tier3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskClassification {
    Low,
    Medium,
    High,
}

impl RiskClassification {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Feature-frame row as handed over by the feature-engineering step.
///
/// Numeric inputs stay optional here: absent or unparsable cells are reported by the
/// engine as [`MissingFeatureError`] instead of being imputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub date: NaiveDate,
    pub city: String,
    #[serde(default)]
    pub city_tier: Option<CityTier>,
    #[serde(default)]
    pub congestion_level: Option<f64>,
    #[serde(default)]
    pub congestion_level_7d_avg: Option<f64>,
    #[serde(default)]
    pub rainfall_mm: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub demand_index: Option<f64>,
}

/// Fully populated observation for one city on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub city: String,
    pub city_tier: CityTier,
    pub congestion_level: f64,
    pub congestion_level_7d_avg: f64,
    pub rainfall_mm: f64,
    pub temperature: f64,
    pub demand_index: f64,
}

impl FeatureRow {
    /// Traffic input: spikes and sustained congestion both count.
    pub fn effective_congestion(&self) -> f64 {
        self.congestion_level.max(self.congestion_level_7d_avg)
    }
}

/// One row of the daily risk table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    pub date: NaiveDate,
    pub city: String,
    pub city_tier: CityTier,
    pub traffic_risk: f64,
    pub weather_risk: f64,
    pub demand_risk: f64,
    pub risk_score: f64,
    pub risk_classification: RiskClassification,
    pub congestion_level: f64,
    pub congestion_level_7d_avg: f64,
    pub rainfall_mm: f64,
    pub temperature: f64,
    pub demand_index: f64,
}

impl ScoredRow {
    pub fn effective_congestion(&self) -> f64 {
        self.congestion_level.max(self.congestion_level_7d_avg)
    }
}

/// High-risk city on the alert date with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRow {
    pub date: NaiveDate,
    pub city: String,
    pub city_tier: CityTier,
    pub risk_score: f64,
    pub risk_classification: RiskClassification,
    pub traffic_risk: f64,
    pub weather_risk: f64,
    pub demand_risk: f64,
    pub alert_reason: String,
}

/// A feature row lacked one of the numeric inputs required for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("row {row} ({city}, {date}): required feature `{field}` is missing or not a finite number")]
pub struct MissingFeatureError {
    pub row: usize,
    pub city: String,
    pub date: NaiveDate,
    pub field: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_labels_parse_loosely() {
        assert_eq!(CityTier::from_label("Tier 1"), Some(CityTier::Tier1));
        assert_eq!(CityTier::from_label(" tier_2 "), Some(CityTier::Tier2));
        assert_eq!(CityTier::from_label("TIER3"), Some(CityTier::Tier3));
        assert_eq!(CityTier::from_label("Unknown"), None);
        assert_eq!(CityTier::from_label(""), None);
    }

    #[test]
    fn effective_congestion_takes_the_higher_reading() {
        let row = FeatureRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 31).expect("valid date"),
            city: "Pune".to_string(),
            city_tier: CityTier::Tier1,
            congestion_level: 0.42,
            congestion_level_7d_avg: 0.61,
            rainfall_mm: 0.0,
            temperature: 24.0,
            demand_index: 0.3,
        };

        assert_eq!(row.effective_congestion(), 0.61);
    }

    #[test]
    fn classification_serializes_as_plain_label() {
        let json = serde_json::to_string(&RiskClassification::Medium).expect("serialize");
        assert_eq!(json, "\"Medium\"");
        let tier = serde_json::to_string(&CityTier::Tier2).expect("serialize");
        assert_eq!(tier, "\"Tier 2\"");
    }
}
