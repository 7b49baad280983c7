// Application state for HTTP handlers
use crate::application::clock::SharedEngine;
use crate::application::export::ExportFormatter;
use crate::application::telemetry_engine::TelemetryEngine;
use crate::domain::alert::AlertRegister;
use crate::infrastructure::config::{AppConfig, SystemSettings};
use crate::infrastructure::sinks::{ChartSeriesSink, MapMarkerSink, ReadoutSink, RecordingIndicatorSink};
use crate::infrastructure::wall_clock::WallClock;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Buffered events per stream client before it starts lagging
pub const STREAM_BUFFER: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
    pub exporter: Arc<dyn ExportFormatter>,
    pub readouts: Arc<ReadoutSink>,
    pub chart: Arc<ChartSeriesSink>,
    pub map: Arc<MapMarkerSink>,
    pub indicator: Arc<RecordingIndicatorSink>,
    pub alerts: Arc<RwLock<AlertRegister>>,
    pub wall_clock: Arc<WallClock>,
    pub system: SystemSettings,
}

impl AppState {
    /// Wire the display sinks into `engine` and wrap everything for sharing.
    /// Sinks are registered in the order they should be notified; stream
    /// clients register their own sinks after these.
    pub fn assemble(mut engine: TelemetryEngine, config: &AppConfig, exporter: Arc<dyn ExportFormatter>) -> Self {
        let readouts = Arc::new(ReadoutSink::new());
        readouts.prime(engine.parameters(), engine.position());
        let chart = Arc::new(ChartSeriesSink::new(config.engine.chart_window));
        let map = Arc::new(MapMarkerSink::new());
        let indicator = Arc::new(RecordingIndicatorSink::new(engine.recording_state()));

        engine.register_sink(readouts.clone());
        engine.register_sink(chart.clone());
        engine.register_sink(map.clone());
        engine.register_sink(indicator.clone());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            exporter,
            readouts,
            chart,
            map,
            indicator,
            alerts: Arc::new(RwLock::new(AlertRegister::seeded())),
            wall_clock: Arc::new(WallClock::new()),
            system: config.system.clone(),
        }
    }
}
