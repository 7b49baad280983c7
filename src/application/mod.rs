// Application layer - Engine, simulation and the seams adapters plug into
pub mod clock;
pub mod export;
pub mod render_sink;
pub mod simulator;
pub mod sink_lease;
pub mod telemetry_engine;
