// HTTP request handlers
use crate::application::export::{ExportArtifact, ExportFormat, SystemAction};
use crate::application::sink_lease::SinkLease;
use crate::domain::alert::{Alert, AlertError, AlertFilter};
use crate::domain::recording::RecordingCommand;
use crate::domain::snapshot::Snapshot;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::config::SystemSettings;
use crate::infrastructure::http_response::{encoded_response, json_response};
use crate::infrastructure::sinks::chart::ChartView;
use crate::infrastructure::sinks::indicator::IndicatorView;
use crate::infrastructure::sinks::map::MarkerView;
use crate::infrastructure::sinks::readout::ReadoutView;
use crate::infrastructure::sinks::BroadcastSink;
use crate::infrastructure::wall_clock::WallClockText;
use crate::presentation::app_state::{AppState, STREAM_BUFFER};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub recording: IndicatorView,
    pub clock: WallClockText,
    pub system: SystemSettings,
    pub ticks: u64,
    pub history_len: usize,
    pub history_capacity: usize,
    pub last_sample_ms: Option<i64>,
    /// Display sinks plus one per connected stream client
    pub sinks: usize,
}

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    filter: Option<AlertFilter>,
}

/// Check if client accepts Brotli compression
fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

fn message(text: String) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": text }))
}

/// Files become downloads, notices become a JSON message
async fn artifact_response(artifact: ExportArtifact, compress: bool) -> Response {
    match artifact {
        ExportArtifact::File {
            filename,
            mime_type,
            content,
        } => match encoded_response(content.into_bytes(), mime_type, compress, Some(&filename)).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        ExportArtifact::Notice(text) => message(text).into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Recording indicator, wall clock, system panel and engine counters
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusView> {
    let engine = state.engine.lock().await;
    let history = engine.history();

    Json(StatusView {
        recording: state.indicator.view(),
        clock: state.wall_clock.read(),
        system: state.system.clone(),
        ticks: engine.tick_count(),
        history_len: history.len(),
        history_capacity: history.capacity(),
        last_sample_ms: history.latest().map(Snapshot::timestamp_ms),
        sinks: engine.sink_count(),
    })
}

/// Apply a start/pause/stop command
pub async fn recording_command(Path(command): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    let Some(command) = RecordingCommand::parse(&command) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let result = {
        let mut engine = state.engine.lock().await;
        match command {
            RecordingCommand::Start => engine.start(),
            RecordingCommand::Pause => engine.pause(),
            RecordingCommand::Stop => engine.stop(),
        }
    };
    let view = state.indicator.view();
    match result {
        Ok(_) => Json(view).into_response(),
        Err(_) => (StatusCode::CONFLICT, Json(view)).into_response(),
    }
}

pub async fn readouts(State(state): State<Arc<AppState>>) -> Json<ReadoutView> {
    Json(state.readouts.view())
}

pub async fn chart(State(state): State<Arc<AppState>>) -> Json<ChartView> {
    Json(state.chart.view())
}

/// Current map marker; the first request creates the map
pub async fn map(State(state): State<Arc<AppState>>) -> Json<MarkerView> {
    // no tick may land between reading the position and creating the marker
    let engine = state.engine.lock().await;
    Json(state.map.open(engine.position()))
}

/// Recorded snapshots, oldest first
pub async fn history(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let snapshots: Vec<Snapshot> = state.engine.lock().await.history().iter().cloned().collect();

    match json_response(&snapshots, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Export recorded history as a downloadable file
pub async fn export(
    Path(format): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let format: ExportFormat = match format.parse() {
        Ok(format) => format,
        Err(e) => {
            tracing::debug!("{}", e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let artifact = state
        .engine
        .lock()
        .await
        .export_snapshots(format, state.exporter.as_ref());
    tracing::info!(?format, "export requested");

    artifact_response(artifact, accepts_brotli(&headers)).await
}

/// Run diagnostics or generate a report; both only answer with a message
pub async fn system_action(
    Path(action): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let action: SystemAction = match action.parse() {
        Ok(action) => action,
        Err(e) => {
            tracing::debug!("{}", e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    artifact_response(state.exporter.action_notice(action), accepts_brotli(&headers)).await
}

/// Alerts, optionally narrowed with `?filter=critical|high|medium|acknowledged`
pub async fn alerts(Query(query): Query<AlertQuery>, State(state): State<Arc<AppState>>) -> Json<Vec<Alert>> {
    let filter = query.filter.unwrap_or_default();
    Json(state.alerts.read().await.filter(filter))
}

pub async fn acknowledge_alert(Path(id): Path<u32>, State(state): State<Arc<AppState>>) -> Response {
    let mut alerts = state.alerts.write().await;
    match alerts.acknowledge(id) {
        Ok(alert) => {
            tracing::info!(alert = id, "alert acknowledged");
            Json(alert.clone()).into_response()
        }
        Err(e @ AlertError::Unknown(_)) => {
            tracing::debug!("{}", e);
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e @ AlertError::NotActive { .. }) => {
            tracing::info!("ignoring acknowledgement: {}", e);
            (StatusCode::CONFLICT, message(e.to_string())).into_response()
        }
    }
}

/// Live stream of snapshots and recording changes.
/// Each client gets its own sink, unregistered when the client goes away.
pub async fn stream(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let sink = Arc::new(BroadcastSink::new(STREAM_BUFFER));
    let rx = sink.subscribe();
    let lease = SinkLease::register(state.engine.clone(), sink).await;
    tracing::debug!(id = ?lease.id(), "stream client connected");

    stream_from_receiver(rx, lease, accepts_brotli(&headers)).await.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::simulator::SensorSimulator;
    use crate::application::telemetry_engine::{TelemetryEngine, TickOutcome};
    use crate::infrastructure::config::{AppConfig, BrandingSettings};
    use crate::infrastructure::export_formatter::FileExporter;
    use axum::body::to_bytes;
    use axum::http::header;

    fn app_state() -> Arc<AppState> {
        let engine = TelemetryEngine::new(SensorSimulator::seeded(21));
        let exporter = Arc::new(FileExporter::new(BrandingSettings::default()));
        Arc::new(AppState::assemble(engine, &AppConfig::default(), exporter))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn tick(state: &AppState, times: i64) {
        let mut engine = state.engine.lock().await;
        for n in 0..times {
            engine.tick_at(n * 2_000);
        }
    }

    #[tokio::test]
    async fn test_recording_commands() {
        let state = app_state();

        let response = recording_command(Path("pause".to_string()), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let view = body_json(response).await;
        assert_eq!(view["status"], "Paused");
        assert_eq!(view["start_enabled"], true);

        let response = recording_command(Path("stop".to_string()), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = recording_command(Path("pause".to_string()), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["status"], "Stopped");

        let response = recording_command(Path("rewind".to_string()), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sinks_follow_ticks() {
        let state = app_state();
        assert_eq!(state.readouts.view().chainage, "KM 1247.350");

        tick(&state, 2).await;

        let Json(readouts) = readouts(State(state.clone())).await;
        assert_eq!(readouts.chainage, "KM 1247.450");
        let Json(chart) = chart(State(state.clone())).await;
        assert_eq!(chart.labels, vec!["1247.400", "1247.450"]);

        let Json(status) = status(State(state.clone())).await;
        assert_eq!(status.ticks, 2);
        assert_eq!(status.history_len, 2);
        assert_eq!(status.history_capacity, 50);
        assert_eq!(status.last_sample_ms, Some(2_000));
        assert_eq!(status.recording.status, "Active");
    }

    #[tokio::test]
    async fn test_status_system_panel() {
        let state = app_state();
        let Json(view) = status(State(state.clone())).await;
        assert_eq!(view.last_sample_ms, None);
        assert_eq!(view.sinks, 4);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["system"]["sampling_interval"], "0.25m");
        assert_eq!(json["system"]["data_storage"], 78);
        assert_eq!(json["system"]["communication"], "connected");
    }

    #[tokio::test]
    async fn test_map_opens_lazily() {
        let state = app_state();
        tick(&state, 1).await;
        assert!(state.map.marker().is_none());

        let Json(marker) = map(State(state.clone())).await;
        assert_eq!(marker.popup, "Current Position\nKM 1247.400");

        tick(&state, 1).await;
        assert_eq!(state.map.marker().unwrap().popup, "Current Position\nKM 1247.450");
    }

    #[tokio::test]
    async fn test_map_marker_matches_engine_position() {
        let state = app_state();
        for _ in 0..5 {
            tick(&state, 1).await;
            let Json(marker) = map(State(state.clone())).await;
            let engine = state.engine.lock().await;
            assert_eq!(marker.latitude, engine.position().latitude);
            assert_eq!(marker.longitude, engine.position().longitude);
            assert_eq!(marker.popup, format!("Current Position\n{}", engine.position().chainage_label()));
        }
    }

    #[tokio::test]
    async fn test_export_csv_download() {
        let state = app_state();
        tick(&state, 3).await;

        let response = export(Path("csv".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"itms_data_teamaamca_"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(csv.lines().count(), 7);
    }

    #[tokio::test]
    async fn test_export_database_and_unknown() {
        let state = app_state();

        let response = export(Path("database".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let notice = body_json(response).await;
        assert!(notice["message"].as_str().unwrap().contains("central repository"));

        let response = export(Path("pdf".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_system_actions() {
        let state = app_state();

        let response = system_action(Path("diagnostics".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let notice = body_json(response).await;
        assert!(notice["message"].as_str().unwrap().contains("All sensors operational"));

        let response = system_action(Path("report".to_string()), HeaderMap::new(), State(state.clone())).await;
        let notice = body_json(response).await;
        assert!(notice["message"].as_str().unwrap().contains("Report by: Team AAMCA"));

        let response = system_action(Path("reboot".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn alert_ids(state: &Arc<AppState>, filter: Option<AlertFilter>) -> Vec<u32> {
        let Json(alerts) = alerts(Query(AlertQuery { filter }), State(state.clone())).await;
        alerts.iter().map(|alert| alert.id).collect()
    }

    #[tokio::test]
    async fn test_alert_filters() {
        let state = app_state();
        assert_eq!(alert_ids(&state, None).await, vec![1, 2, 3]);
        assert_eq!(alert_ids(&state, Some(AlertFilter::All)).await, vec![1, 2, 3]);
        assert_eq!(alert_ids(&state, Some(AlertFilter::Critical)).await, vec![3]);
        assert_eq!(alert_ids(&state, Some(AlertFilter::High)).await, vec![1]);
        assert_eq!(alert_ids(&state, Some(AlertFilter::Medium)).await, vec![2]);
        assert_eq!(alert_ids(&state, Some(AlertFilter::Acknowledged)).await, vec![2]);
    }

    #[tokio::test]
    async fn test_acknowledge_alert_twice() {
        let state = app_state();

        let response = acknowledge_alert(Path(1), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let alert = body_json(response).await;
        assert_eq!(alert["status"], "Acknowledged");
        assert_eq!(alert["type"], "Track Geometry");
        assert_eq!(alert_ids(&state, Some(AlertFilter::Acknowledged)).await, vec![1, 2]);

        let response = acknowledge_alert(Path(1), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("is Acknowledged"));

        let response = acknowledge_alert(Path(9), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stream_client_sink_is_released() {
        let state = app_state();
        assert_eq!(state.engine.lock().await.sink_count(), 4);

        let response = stream(HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.engine.lock().await.sink_count(), 5);

        // the map has not been opened, so it is the only skipped sink
        let outcome = state.engine.lock().await.tick_at(0);
        assert!(matches!(
            outcome,
            TickOutcome::Advanced { fan_out, .. } if fan_out.delivered == 4 && fan_out.skipped == 1
        ));

        drop(response);
        assert_eq!(state.engine.lock().await.sink_count(), 4);
    }

    #[tokio::test]
    async fn test_history_endpoint() {
        let state = app_state();
        tick(&state, 4).await;

        let response = history(HeaderMap::new(), State(state.clone())).await;
        let snapshots = body_json(response).await;
        let snapshots = snapshots.as_array().unwrap();
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[0]["timestamp_ms"], 0);
        assert!(snapshots[3]["parameters"]["cross_level"]["value"].is_number());
    }
}
