use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use ops_risk::domain::{AlertRow, MissingFeatureError, ScoredRow};
use ops_risk::error::AppError;
use ops_risk::ingest::FeatureFrameImporter;
use ops_risk::report::RiskRunSummary;
use ops_risk::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct RiskAssessRequest {
    pub(crate) features_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) alert_date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) include_scored: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RiskAssessResponse {
    pub(crate) alert_date: Option<NaiveDate>,
    pub(crate) summary: RiskRunSummary,
    pub(crate) alerts: Vec<AlertRow>,
    pub(crate) rejected: Vec<MissingFeatureError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) scored: Option<Vec<ScoredRow>>,
}

pub(crate) fn risk_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/risk/config",
            axum::routing::get(scoring_config_endpoint),
        )
        .route(
            "/api/v1/risk/assess",
            axum::routing::post(risk_assess_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn scoring_config_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ScoringConfig> {
    Json(state.engine.config().clone())
}

pub(crate) async fn risk_assess_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RiskAssessRequest>,
) -> Result<Json<RiskAssessResponse>, AppError> {
    let RiskAssessRequest {
        features_csv,
        alert_date,
        include_scored,
    } = payload;

    let records = FeatureFrameImporter::from_reader(Cursor::new(features_csv.into_bytes()))?;
    let assessment = state.engine.assess_for_date(&records, alert_date);
    let summary = assessment.summary();

    info!(
        rows = records.len(),
        alerts = assessment.alerts.len(),
        "risk assessment served"
    );

    Ok(Json(RiskAssessResponse {
        alert_date: assessment.alert_date,
        summary,
        alerts: assessment.alerts,
        rejected: assessment.rejected,
        scored: include_scored.then_some(assessment.scored),
    }))
}
