// Recording status indicator and control enablement
use crate::application::render_sink::{RenderSink, SinkError};
use crate::domain::position::PositionModel;
use crate::domain::recording::{RecordingCommand, RecordingState};
use crate::domain::snapshot::Snapshot;
use serde::Serialize;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorView {
    pub status: &'static str,
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub stop_enabled: bool,
}

impl IndicatorView {
    pub fn for_state(state: RecordingState) -> Self {
        let [start_enabled, pause_enabled, stop_enabled] = RecordingCommand::ALL.map(|command| state.permits(command));
        Self {
            status: state.label(),
            start_enabled,
            pause_enabled,
            stop_enabled,
        }
    }
}

#[derive(Debug)]
pub struct RecordingIndicatorSink {
    view: RwLock<IndicatorView>,
}

impl RecordingIndicatorSink {
    pub fn new(initial: RecordingState) -> Self {
        Self {
            view: RwLock::new(IndicatorView::for_state(initial)),
        }
    }

    pub fn view(&self) -> IndicatorView {
        self.view.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RenderSink for RecordingIndicatorSink {
    fn name(&self) -> &str {
        "recording-indicator"
    }

    fn on_snapshot(&self, _snapshot: &Snapshot, _position: &PositionModel) -> Result<(), SinkError> {
        Ok(())
    }

    fn on_recording_state(&self, state: RecordingState) -> Result<(), SinkError> {
        *self.view.write().unwrap_or_else(|e| e.into_inner()) = IndicatorView::for_state(state);
        Ok(())
    }
}
