use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use ops_risk::config::PipelineConfig;
use ops_risk::error::AppError;
use ops_risk::scoring::RiskEngine;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<RiskEngine>,
}

/// Builds the engine from the configured rule table, or `override_path` when given.
pub(crate) fn build_engine(
    pipeline: &PipelineConfig,
    override_path: Option<PathBuf>,
) -> Result<RiskEngine, AppError> {
    let pipeline = match override_path {
        Some(path) => PipelineConfig {
            scoring_config: Some(path),
            ..pipeline.clone()
        },
        None => pipeline.clone(),
    };

    let scoring = pipeline.scoring()?;
    Ok(RiskEngine::new(scoring)?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
