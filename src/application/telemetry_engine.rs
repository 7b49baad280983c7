// Telemetry engine - Drives the tick and fans snapshots out to sinks
use crate::application::export::{ExportArtifact, ExportData, ExportFormat, ExportFormatter};
use crate::application::render_sink::{RenderSink, SinkError};
use crate::application::simulator::SensorSimulator;
use crate::domain::history::HistoryBuffer;
use crate::domain::position::PositionModel;
use crate::domain::recording::{RecordingCommand, RecordingController, RecordingState, TransitionError};
use crate::domain::snapshot::{seeded_parameters, ParameterSet, Snapshot};
use chrono::Utc;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

/// Per-notification delivery counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Recording is not active; nothing changed
    Skipped(RecordingState),
    Advanced { tick: u64, fan_out: FanOutReport },
}

/// Sole owner of the track models, recording gate and history.
pub struct TelemetryEngine {
    parameters: ParameterSet,
    position: PositionModel,
    simulator: SensorSimulator,
    recorder: RecordingController,
    history: HistoryBuffer,
    sinks: Vec<(SinkId, Arc<dyn RenderSink>)>,
    next_sink_id: u64,
    ticks: u64,
}

impl TelemetryEngine {
    pub fn new(simulator: SensorSimulator) -> Self {
        Self {
            parameters: seeded_parameters(),
            position: PositionModel::seeded(),
            simulator,
            recorder: RecordingController::new(),
            history: HistoryBuffer::default(),
            sinks: Vec::new(),
            next_sink_id: 0,
            ticks: 0,
        }
    }

    pub fn register_sink(&mut self, sink: Arc<dyn RenderSink>) -> SinkId {
        let id = SinkId(self.next_sink_id);
        self.next_sink_id += 1;
        tracing::debug!(sink = sink.name(), "registered render sink");
        self.sinks.push((id, sink));
        id
    }

    /// Returns false when the id was not registered
    pub fn unregister_sink(&mut self, id: SinkId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sink_id, _)| *sink_id != id);
        self.sinks.len() != before
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.tick_at(Utc::now().timestamp_millis())
    }

    /// Advance one step, stamping the snapshot with `timestamp_ms`
    pub fn tick_at(&mut self, timestamp_ms: i64) -> TickOutcome {
        let state = self.recorder.state();
        if !state.permits_mutation() {
            return TickOutcome::Skipped(state);
        }

        let mut advanced = ParameterSet::new();
        for (kind, model) in &self.parameters {
            advanced.insert(*kind, self.simulator.advance(model, kind.max_step()));
        }
        self.parameters = advanced;
        self.position = self.simulator.advance_position(&self.position);
        self.ticks += 1;

        let snapshot = Snapshot::new(timestamp_ms, self.position.chainage_km, self.parameters.clone());
        self.history.push(snapshot.clone());

        let position = &self.position;
        let fan_out = self.notify(|sink| sink.on_snapshot(&snapshot, position));

        TickOutcome::Advanced {
            tick: self.ticks,
            fan_out,
        }
    }

    pub fn start(&mut self) -> Result<RecordingState, TransitionError> {
        self.command(RecordingCommand::Start)
    }

    pub fn pause(&mut self) -> Result<RecordingState, TransitionError> {
        self.command(RecordingCommand::Pause)
    }

    pub fn stop(&mut self) -> Result<RecordingState, TransitionError> {
        self.command(RecordingCommand::Stop)
    }

    /// Apply a recording command; undefined edges leave everything untouched
    pub fn command(&mut self, command: RecordingCommand) -> Result<RecordingState, TransitionError> {
        match self.recorder.apply(command) {
            Ok(state) => {
                tracing::info!(%command, %state, "recording state changed");
                self.notify(|sink| sink.on_recording_state(state));
                Ok(state)
            }
            Err(e) => {
                tracing::info!("ignoring recording command: {}", e);
                Err(e)
            }
        }
    }

    pub fn export_snapshots(&self, format: ExportFormat, formatter: &dyn ExportFormatter) -> ExportArtifact {
        formatter.export(
            format,
            ExportData {
                history: &self.history,
                parameters: &self.parameters,
                position: &self.position,
                exported_at: Utc::now(),
            },
        )
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn position(&self) -> &PositionModel {
        &self.position
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn recording_state(&self) -> RecordingState {
        self.recorder.state()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Call `f` on every sink in registration order. A failing or panicking
    /// sink is logged and the rest are still called.
    fn notify<F>(&self, mut f: F) -> FanOutReport
    where
        F: FnMut(&dyn RenderSink) -> Result<(), SinkError>,
    {
        let mut report = FanOutReport::default();

        for (_, sink) in &self.sinks {
            let result = panic::catch_unwind(AssertUnwindSafe(|| f(sink.as_ref())))
                .unwrap_or_else(|_| Err(SinkError::Failed("panicked during notification".to_string())));
            match result {
                Ok(()) => report.delivered += 1,
                Err(SinkError::TargetAbsent(target)) => {
                    tracing::debug!(sink = sink.name(), render_target = target, "render target absent, skipping");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(sink = sink.name(), error = %e, "sink notification failed");
                    report.failed += 1;
                }
            }
        }

        report
    }
}
