// Live stream sink - Republishes engine events to stream subscribers
use crate::application::render_sink::{RenderSink, SinkError};
use crate::domain::position::PositionModel;
use crate::domain::recording::RecordingState;
use crate::domain::snapshot::Snapshot;
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Snapshot {
        snapshot: Snapshot,
        position: PositionModel,
    },
    Recording {
        state: RecordingState,
    },
}

#[derive(Debug)]
pub struct BroadcastSink {
    tx: broadcast::Sender<StreamEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StreamEvent> {
        self.tx.subscribe()
    }

    fn publish(&self, event: StreamEvent) -> Result<(), SinkError> {
        // send only fails when nobody is listening
        self.tx
            .send(event)
            .map(|_| ())
            .map_err(|_| SinkError::TargetAbsent("stream"))
    }
}

impl RenderSink for BroadcastSink {
    fn name(&self) -> &str {
        "stream"
    }

    fn on_snapshot(&self, snapshot: &Snapshot, position: &PositionModel) -> Result<(), SinkError> {
        self.publish(StreamEvent::Snapshot {
            snapshot: snapshot.clone(),
            position: position.clone(),
        })
    }

    fn on_recording_state(&self, state: RecordingState) -> Result<(), SinkError> {
        self.publish(StreamEvent::Recording { state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::seeded_parameters;

    #[test]
    fn test_no_subscribers_is_absent_target() {
        let sink = BroadcastSink::new(8);
        let position = PositionModel::seeded();
        let snapshot = Snapshot::new(0, position.chainage_km, seeded_parameters());
        assert!(matches!(
            sink.on_snapshot(&snapshot, &position),
            Err(SinkError::TargetAbsent("stream"))
        ));
    }

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let sink = BroadcastSink::new(8);
        let mut rx = sink.subscribe();
        let position = PositionModel::seeded();
        let snapshot = Snapshot::new(5, position.chainage_km, seeded_parameters());

        sink.on_snapshot(&snapshot, &position).unwrap();
        sink.on_recording_state(RecordingState::Paused).unwrap();

        match rx.recv().await.unwrap() {
            StreamEvent::Snapshot { snapshot, .. } => assert_eq!(snapshot.timestamp_ms(), 5),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(matches!(
            rx.recv().await.unwrap(),
            StreamEvent::Recording {
                state: RecordingState::Paused
            }
        ));
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(StreamEvent::Recording {
            state: RecordingState::Stopped,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "recording", "state": "Stopped"}));
    }
}
