// Live parameters chart series
use crate::application::render_sink::{RenderSink, SinkError};
use crate::domain::parameter::ParameterKind;
use crate::domain::position::PositionModel;
use crate::domain::snapshot::Snapshot;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::RwLock;

/// Parameters plotted on the live chart, with their line colours
const PLOTTED: [(ParameterKind, &str); 3] = [
    (ParameterKind::Gauge, "#1FB8CD"),
    (ParameterKind::Alignment, "#FFC185"),
    (ParameterKind::CrossLevel, "#B4413C"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub id: &'static str,
    pub label: String,
    pub color: &'static str,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub x_title: &'static str,
    pub y_title: &'static str,
    /// Chainage labels, 3 decimals
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone)]
struct ChartPoint {
    label: String,
    values: [f64; PLOTTED.len()],
}

/// Keeps the last `window` points of the plotted parameters.
#[derive(Debug)]
pub struct ChartSeriesSink {
    window: usize,
    points: RwLock<VecDeque<ChartPoint>>,
}

impl ChartSeriesSink {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            points: RwLock::new(VecDeque::with_capacity(window)),
        }
    }

    pub fn view(&self) -> ChartView {
        let points = self.points.read().unwrap_or_else(|e| e.into_inner());

        let series = PLOTTED
            .iter()
            .enumerate()
            .map(|(idx, (kind, color))| ChartSeries {
                id: kind.name(),
                label: format!("{} (mm)", kind.title()),
                color: *color,
                points: points.iter().map(|p| p.values[idx]).collect(),
            })
            .collect();

        ChartView {
            x_title: "Distance (KM)",
            y_title: "Value (mm)",
            labels: points.iter().map(|p| p.label.clone()).collect(),
            series,
        }
    }
}

impl RenderSink for ChartSeriesSink {
    fn name(&self) -> &str {
        "chart"
    }

    fn on_snapshot(&self, snapshot: &Snapshot, _position: &PositionModel) -> Result<(), SinkError> {
        let point = ChartPoint {
            label: format!("{:.3}", snapshot.chainage_km()),
            values: PLOTTED.map(|(kind, _)| snapshot.value_of(kind)),
        };

        let mut points = self.points.write().unwrap_or_else(|e| e.into_inner());
        if points.len() == self.window {
            points.pop_front();
        }
        points.push_back(point);
        Ok(())
    }
}
