use crate::domain::{CityTier, RiskClassification};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationCount {
    pub classification: RiskClassification,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierAlertCount {
    pub tier: CityTier,
    pub label: &'static str,
    pub alerts: usize,
}

/// One line of the ranked city list for the alert date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCityEntry {
    pub city: String,
    pub city_tier: CityTier,
    pub risk_score: f64,
    pub risk_classification: RiskClassification,
    pub traffic_risk: f64,
    pub weather_risk: f64,
    pub demand_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationTrendEntry {
    pub date: NaiveDate,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl ClassificationTrendEntry {
    pub(crate) fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            low: 0,
            medium: 0,
            high: 0,
        }
    }
}

/// Headline numbers for one assessment run, shown by the CLI and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskRunSummary {
    pub cities_monitored: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub alert_date: Option<NaiveDate>,
    /// Low/Medium/High counts for the alert date.
    pub distribution: Vec<ClassificationCount>,
    pub alerts_by_tier: Vec<TierAlertCount>,
    pub alert_count: usize,
    pub highest_risk_city: Option<String>,
    /// Up to ten highest-scoring cities on the alert date.
    pub top_cities: Vec<TopCityEntry>,
    /// Per-day classification counts for the last seven dates, oldest first.
    pub classification_trend: Vec<ClassificationTrendEntry>,
    pub scored_rows: usize,
    pub rejected_rows: usize,
}

impl RiskRunSummary {
    pub fn count_for(&self, classification: RiskClassification) -> usize {
        self.distribution
            .iter()
            .find(|entry| entry.classification == classification)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Plain-text lines for terminal output.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Cities monitored: {}", self.cities_monitored)];

        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            lines.push(format!("Date range: {} to {}", first, last));
        }
        if let Some(date) = self.alert_date {
            lines.push(format!("Alert date: {}", date));
        }

        let distribution = self
            .distribution
            .iter()
            .map(|entry| format!("{} {}", entry.label, entry.count))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Risk distribution: {}", distribution));
        lines.push(format!("High-risk alerts: {}", self.alert_count));

        if let Some(city) = &self.highest_risk_city {
            lines.push(format!("Highest risk: {}", city));
        }
        if !self.top_cities.is_empty() {
            lines.push(String::new());
            lines.push("Top cities by risk score".to_string());
            for entry in &self.top_cities {
                lines.push(format!(
                    "- {}: {:.1} {} (traffic {:.1}, weather {:.1}, demand {:.1})",
                    entry.city,
                    entry.risk_score,
                    entry.risk_classification.label(),
                    entry.traffic_risk,
                    entry.weather_risk,
                    entry.demand_risk
                ));
            }
        }

        if !self.classification_trend.is_empty() {
            lines.push(String::new());
            lines.push("Classification trend".to_string());
            for entry in &self.classification_trend {
                lines.push(format!(
                    "- {}: Low {}, Medium {}, High {}",
                    entry.date, entry.low, entry.medium, entry.high
                ));
            }
        }

        if self.rejected_rows > 0 {
            lines.push(format!(
                "Rows skipped for missing features: {}",
                self.rejected_rows
            ));
        }

        lines
    }
}
