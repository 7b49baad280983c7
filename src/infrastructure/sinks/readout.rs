// Numeric readouts and status badges
use crate::application::render_sink::{RenderSink, SinkError};
use crate::domain::classifier::Status;
use crate::domain::position::PositionModel;
use crate::domain::snapshot::{ParameterSet, Snapshot};
use serde::Serialize;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterReadout {
    pub name: &'static str,
    pub title: &'static str,
    pub value: String,
    pub unit: String,
    pub status: Status,
    pub badge: &'static str,
    pub threshold: f64,
    /// Scale of the card's level bar
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadoutView {
    pub parameters: Vec<ParameterReadout>,
    pub speed: String,
    pub chainage: String,
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub heading: String,
    pub distance_travelled: String,
}

impl ReadoutView {
    pub fn render(parameters: &ParameterSet, position: &PositionModel) -> Self {
        let parameters = parameters
            .iter()
            .map(|(kind, model)| ParameterReadout {
                name: kind.name(),
                title: kind.title(),
                value: format!("{:.1}", model.value()),
                unit: model.unit().to_string(),
                status: model.status(),
                badge: model.status().label(),
                threshold: model.threshold(),
                min: model.min_bound(),
                max: model.max_bound(),
            })
            .collect();

        Self {
            parameters,
            speed: format!("{} km/h", position.speed.round() as i64),
            chainage: position.chainage_label(),
            latitude: format!("{:.4}", position.latitude),
            longitude: format!("{:.4}", position.longitude),
            altitude: position.altitude.to_string(),
            heading: format!("{:0>3}°", position.heading.to_string()),
            distance_travelled: format!("{:.1} km", position.distance_travelled_km()),
        }
    }
}

/// Parameter cards, header speed/chainage and GPS panel text.
#[derive(Debug, Default)]
pub struct ReadoutSink {
    view: RwLock<ReadoutView>,
}

impl ReadoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the engine's state before the first tick
    pub fn prime(&self, parameters: &ParameterSet, position: &PositionModel) {
        self.store(ReadoutView::render(parameters, position));
    }

    pub fn view(&self) -> ReadoutView {
        self.view.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn store(&self, view: ReadoutView) {
        *self.view.write().unwrap_or_else(|e| e.into_inner()) = view;
    }
}

impl RenderSink for ReadoutSink {
    fn name(&self) -> &str {
        "readouts"
    }

    fn on_snapshot(&self, snapshot: &Snapshot, position: &PositionModel) -> Result<(), SinkError> {
        self.store(ReadoutView::render(snapshot.parameters(), position));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::seeded_parameters;

    #[test]
    fn test_render_seed_state() {
        let view = ReadoutView::render(&seeded_parameters(), &PositionModel::seeded());

        assert_eq!(view.parameters.len(), 5);
        let gauge = &view.parameters[0];
        assert_eq!(gauge.name, "gauge");
        assert_eq!(gauge.value, "1435.2");
        assert_eq!(gauge.badge, "Warning");
        assert_eq!((gauge.threshold, gauge.min, gauge.max), (1440.0, 1430.0, 1445.0));
        assert_eq!(view.parameters[4].title, "Cross Level");
        assert_eq!(view.parameters[4].badge, "Normal");

        assert_eq!(view.speed, "85 km/h");
        assert_eq!(view.chainage, "KM 1247.350");
        assert_eq!(view.latitude, "28.6139");
        assert_eq!(view.longitude, "77.2090");
        assert_eq!(view.altitude, "216");
        assert_eq!(view.heading, "045°");
        assert_eq!(view.distance_travelled, "24.7 km");
    }

    #[test]
    fn test_sink_updates_view() {
        let sink = ReadoutSink::new();
        assert!(sink.view().parameters.is_empty());

        let mut position = PositionModel::seeded();
        position.speed = 120.6;
        let snapshot = Snapshot::new(0, position.chainage_km, seeded_parameters());
        sink.on_snapshot(&snapshot, &position).unwrap();
        assert_eq!(sink.view().speed, "121 km/h");
    }
}
