use crate::infra::build_engine;
use chrono::NaiveDate;
use clap::Args;
use ops_risk::config::AppConfig;
use ops_risk::error::AppError;
use ops_risk::ingest::FeatureFrameImporter;
use ops_risk::report::{write_outputs, OutputPaths};
use ops_risk::scoring::RiskAssessment;
use ops_risk::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Feature CSV to score (defaults to RISK_FEATURES_PATH)
    #[arg(long)]
    pub(crate) features: Option<PathBuf>,
    /// Directory for daily_city_risk.csv and alerts_today.csv (defaults to RISK_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// JSON rule table overriding the built-in scoring defaults
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
    /// Report alerts for this date instead of the latest one in the frame
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) alert_date: Option<NaiveDate>,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        features,
        output_dir,
        scoring_config,
        alert_date,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let engine = build_engine(&config.pipeline, scoring_config)?;
    let features = features.unwrap_or_else(|| config.pipeline.features_path.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.pipeline.output_dir.clone());

    let records = FeatureFrameImporter::from_path(&features)?;
    let assessment = engine.assess_for_date(&records, alert_date);
    let paths = write_outputs(&output_dir, &assessment)?;

    for line in render_assessment(&assessment, &paths) {
        println!("{line}");
    }

    Ok(())
}

pub(crate) fn render_assessment(assessment: &RiskAssessment, paths: &OutputPaths) -> Vec<String> {
    let mut lines = vec!["City operational risk assessment".to_string()];
    lines.extend(assessment.summary().lines());

    if assessment.alerts.is_empty() {
        lines.push(String::new());
        lines.push("High-risk cities: none".to_string());
    } else {
        lines.push(String::new());
        lines.push("High-risk cities".to_string());
        for alert in &assessment.alerts {
            lines.push(format!(
                "- {} ({}): {:.1} | {}",
                alert.city,
                alert.city_tier.label(),
                alert.risk_score,
                alert.alert_reason
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Daily risk table: {}", paths.daily_risk.display()));
    lines.push(format!("Alerts table: {}", paths.alerts.display()));
    lines
}
