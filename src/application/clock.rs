// Clock drivers - Periodic tick and wall-clock refresh
use crate::application::telemetry_engine::{TelemetryEngine, TickOutcome};
use crate::infrastructure::wall_clock::WallClock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

pub type SharedEngine = Arc<Mutex<TelemetryEngine>>;

/// Tick the engine every `period`, forever.
///
/// The lock is held for one whole tick, so ticks never overlap and commands
/// issued meanwhile are applied between ticks.
pub async fn run_tick_clock(engine: SharedEngine, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick of an interval fires immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let outcome = engine.lock().await.tick();
        match outcome {
            TickOutcome::Advanced { tick, fan_out } if fan_out.failed > 0 => {
                tracing::debug!(tick, failed = fan_out.failed, "tick completed with sink failures");
            }
            TickOutcome::Advanced { tick, .. } => tracing::trace!(tick, "tick completed"),
            TickOutcome::Skipped(state) => tracing::trace!(%state, "tick skipped"),
        }
    }
}

/// Refresh the display clock every `period`. Never touches the engine.
pub async fn run_wall_clock(clock: Arc<WallClock>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        clock.refresh();
    }
}
