// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::clock::{run_tick_clock, run_wall_clock};
use crate::application::simulator::SensorSimulator;
use crate::application::telemetry_engine::TelemetryEngine;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::export_formatter::FileExporter;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    acknowledge_alert, alerts, chart, export, health_check, history, map, readouts, recording_command, status,
    stream, system_action,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create engine (application layer)
    let simulator = match config.engine.seed {
        Some(seed) => SensorSimulator::seeded(seed),
        None => SensorSimulator::from_entropy(),
    };
    let engine = TelemetryEngine::new(simulator);
    let exporter = Arc::new(FileExporter::new(config.branding.clone()));

    // Register display sinks and create application state
    let state = Arc::new(AppState::assemble(engine, &config, exporter));

    tracing::info!("ITMS dashboard initialized for {}", config.branding.company_name);
    tracing::info!("Visit us at {}", config.branding.website);

    // Start clocks
    tokio::spawn(run_tick_clock(state.engine.clone(), config.engine.tick_interval()));
    tokio::spawn(run_wall_clock(state.wall_clock.clone(), config.engine.wall_clock_interval()));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/status", get(status))
        .route("/recording/:command", post(recording_command))
        .route("/readouts", get(readouts))
        .route("/chart", get(chart))
        .route("/map", get(map))
        .route("/history", get(history))
        .route("/export/:format", get(export))
        .route("/actions/:action", post(system_action))
        .route("/alerts", get(alerts))
        .route("/alerts/:id/acknowledge", post(acknowledge_alert))
        .route("/stream", get(stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting itms-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
