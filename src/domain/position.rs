// Vehicle position domain model
use serde::Serialize;

/// Chainage the inspection run is measured from, for distance travelled.
pub const BASE_CHAINAGE_KM: f64 = 1222.650;

pub const MAX_SPEED_KMH: f64 = 200.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionModel {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: f64,
    pub heading: f64,
    pub chainage_km: f64,
}

impl PositionModel {
    pub fn new(latitude: f64, longitude: f64, altitude: f64, speed: f64, heading: f64, chainage_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            speed: speed.clamp(0.0, MAX_SPEED_KMH),
            heading: heading.rem_euclid(360.0),
            chainage_km,
        }
    }

    /// Starting position of the inspection run
    pub fn seeded() -> Self {
        Self::new(28.6139, 77.2090, 216.0, 85.0, 45.0, 1247.350)
    }

    /// Chainage as shown on the header and map ("KM 1247.350")
    pub fn chainage_label(&self) -> String {
        format_chainage(self.chainage_km)
    }

    pub fn distance_travelled_km(&self) -> f64 {
        self.chainage_km - BASE_CHAINAGE_KM
    }
}

pub fn format_chainage(chainage_km: f64) -> String {
    format!("KM {:.3}", chainage_km)
}
