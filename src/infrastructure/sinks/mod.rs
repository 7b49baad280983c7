// Concrete render sinks - Display view-models fed by the engine
pub mod broadcast;
pub mod chart;
pub mod indicator;
pub mod map;
pub mod readout;

pub use broadcast::{BroadcastSink, StreamEvent};
pub use chart::ChartSeriesSink;
pub use indicator::RecordingIndicatorSink;
pub use map::MapMarkerSink;
pub use readout::ReadoutSink;
