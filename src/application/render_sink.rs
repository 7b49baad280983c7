// Sink trait for consumers of engine snapshots
use crate::domain::position::PositionModel;
use crate::domain::recording::RecordingState;
use crate::domain::snapshot::Snapshot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    /// The display target this sink draws into does not exist (yet)
    #[error("render target {0} is not available")]
    TargetAbsent(&'static str),
    #[error("sink failed: {0}")]
    Failed(String),
}

/// Display adapter notified after every active tick.
///
/// Sinks get read-only views of engine state and must not block.
pub trait RenderSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Called with each new snapshot and the position it was taken at
    fn on_snapshot(&self, snapshot: &Snapshot, position: &PositionModel) -> Result<(), SinkError>;

    /// Called after a recording command changed the state
    fn on_recording_state(&self, _state: RecordingState) -> Result<(), SinkError> {
        Ok(())
    }
}
