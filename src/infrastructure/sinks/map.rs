// Map position marker
use crate::application::render_sink::{RenderSink, SinkError};
use crate::domain::position::PositionModel;
use crate::domain::snapshot::Snapshot;
use serde::Serialize;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
}

impl MarkerView {
    fn at(position: &PositionModel) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
            popup: format!("Current Position\n{}", position.chainage_label()),
        }
    }
}

/// The map only exists once someone has opened the tracking view.
/// Until then snapshots are skipped as `TargetAbsent`.
#[derive(Debug, Default)]
pub struct MapMarkerSink {
    marker: RwLock<Option<MarkerView>>,
}

impl MapMarkerSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the map at `position` if needed and return the current marker
    pub fn open(&self, position: &PositionModel) -> MarkerView {
        let mut marker = self.marker.write().unwrap_or_else(|e| e.into_inner());
        marker.get_or_insert_with(|| MarkerView::at(position)).clone()
    }

    #[cfg(test)]
    pub fn marker(&self) -> Option<MarkerView> {
        self.marker.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RenderSink for MapMarkerSink {
    fn name(&self) -> &str {
        "map"
    }

    fn on_snapshot(&self, _snapshot: &Snapshot, position: &PositionModel) -> Result<(), SinkError> {
        let mut marker = self.marker.write().unwrap_or_else(|e| e.into_inner());
        match marker.as_mut() {
            Some(view) => {
                *view = MarkerView::at(position);
                Ok(())
            }
            None => Err(SinkError::TargetAbsent("map")),
        }
    }
}
