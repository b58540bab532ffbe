pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod report;
pub mod scoring;
pub mod telemetry;
