use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes::risk_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ops_risk::config::AppConfig;
use ops_risk::error::AppError;
use ops_risk::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(build_engine(&config.pipeline, None)?);
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine,
    };

    let app = risk_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "operational risk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
