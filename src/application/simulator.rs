// Sensor simulator - Bounded random walk over track readings
use crate::domain::parameter::ParameterModel;
use crate::domain::position::{PositionModel, MAX_SPEED_KMH};
use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Full width of the latitude/longitude jitter per tick, in degrees
const COORDINATE_STEP_DEG: f64 = 0.0001;
/// Full width of the speed jitter per tick, in km/h
const SPEED_STEP_KMH: f64 = 5.0;
/// Distance covered per tick
pub const CHAINAGE_STEP_KM: f64 = 0.05;

/// Advances readings by one tick with its own pseudo-random source.
#[derive(Debug, Clone)]
pub struct SensorSimulator {
    rng: StdRng,
}

impl SensorSimulator {
    /// Deterministic simulator; the same seed replays the same walk.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Perturb `model` by up to `max_step / 2` either way, then clamp to its bounds
    pub fn advance(&mut self, model: &ParameterModel, max_step: f64) -> ParameterModel {
        let delta = self.jitter(max_step);
        model.with_value(model.value() + delta)
    }

    pub fn advance_position(&mut self, position: &PositionModel) -> PositionModel {
        let latitude = position.latitude + self.jitter(COORDINATE_STEP_DEG);
        let longitude = position.longitude + self.jitter(COORDINATE_STEP_DEG);
        let speed = (position.speed + self.jitter(SPEED_STEP_KMH)).clamp(0.0, MAX_SPEED_KMH);

        PositionModel {
            latitude,
            longitude,
            speed,
            chainage_km: next_chainage(position.chainage_km),
            ..position.clone()
        }
    }

    /// Uniform sample in `[-width/2, width/2)`
    fn jitter(&mut self, width: f64) -> f64 {
        let unit: f64 = self.rng.sample(Standard);
        (unit - 0.5) * width
    }
}

/// Chainage is kept at metre resolution so repeated steps do not drift.
fn next_chainage(chainage_km: f64) -> f64 {
    ((chainage_km + CHAINAGE_STEP_KM) * 1000.0).round() / 1000.0
}
