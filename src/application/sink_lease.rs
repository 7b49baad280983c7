// Sink lease - Keeps a render sink registered while its owner is alive
use crate::application::clock::SharedEngine;
use crate::application::render_sink::RenderSink;
use crate::application::telemetry_engine::SinkId;
use std::sync::Arc;

/// Registration of one sink with the shared engine.
///
/// Dropping the lease unregisters the sink. If the engine is busy with a
/// tick the removal is handed to the runtime and lands after that tick.
pub struct SinkLease {
    engine: SharedEngine,
    id: SinkId,
}

impl SinkLease {
    pub async fn register(engine: SharedEngine, sink: Arc<dyn RenderSink>) -> Self {
        let id = engine.lock().await.register_sink(sink);
        Self { engine, id }
    }

    pub fn id(&self) -> SinkId {
        self.id
    }
}

impl Drop for SinkLease {
    fn drop(&mut self) {
        let id = self.id;
        if let Ok(mut engine) = self.engine.try_lock() {
            engine.unregister_sink(id);
            tracing::debug!(?id, "sink lease released");
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let engine = self.engine.clone();
                handle.spawn(async move {
                    engine.lock().await.unregister_sink(id);
                    tracing::debug!(?id, "sink lease released");
                });
            }
            Err(_) => tracing::warn!(?id, "no runtime to release sink lease, sink stays registered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render_sink::SinkError;
    use crate::application::simulator::SensorSimulator;
    use crate::application::telemetry_engine::TelemetryEngine;
    use crate::domain::position::PositionModel;
    use crate::domain::snapshot::Snapshot;
    use tokio::sync::Mutex;

    struct QuietSink;

    impl RenderSink for QuietSink {
        fn name(&self) -> &str {
            "quiet"
        }

        fn on_snapshot(&self, _snapshot: &Snapshot, _position: &PositionModel) -> Result<(), SinkError> {
            Ok(())
        }
    }

    fn shared_engine() -> SharedEngine {
        Arc::new(Mutex::new(TelemetryEngine::new(SensorSimulator::seeded(4))))
    }

    #[tokio::test]
    async fn test_drop_unregisters() {
        let engine = shared_engine();
        let lease = SinkLease::register(engine.clone(), Arc::new(QuietSink)).await;
        let id = lease.id();
        assert_eq!(engine.lock().await.sink_count(), 1);

        drop(lease);
        let mut engine = engine.lock().await;
        assert_eq!(engine.sink_count(), 0);
        assert!(!engine.unregister_sink(id));
    }

    #[tokio::test]
    async fn test_drop_while_engine_busy() {
        let engine = shared_engine();
        let lease = SinkLease::register(engine.clone(), Arc::new(QuietSink)).await;

        {
            let guard = engine.lock().await;
            drop(lease);
            assert_eq!(guard.sink_count(), 1);
        }

        // the deferred removal needs the lock we just released
        let mut remaining = 1;
        for _ in 0..10 {
            tokio::task::yield_now().await;
            remaining = engine.lock().await.sink_count();
            if remaining == 0 {
                break;
            }
        }
        assert_eq!(remaining, 0);
    }
}
