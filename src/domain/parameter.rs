// Track geometry parameter domain model
use super::classifier::{classify, Status};
use serde::Serialize;
use std::fmt;

/// The geometric parameters measured by the inspection vehicle.
///
/// Variant order is the column order used by chart and export adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Gauge,
    Alignment,
    Unevenness,
    Twist,
    CrossLevel,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 5] = [
        ParameterKind::Gauge,
        ParameterKind::Alignment,
        ParameterKind::Unevenness,
        ParameterKind::Twist,
        ParameterKind::CrossLevel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParameterKind::Gauge => "gauge",
            ParameterKind::Alignment => "alignment",
            ParameterKind::Unevenness => "unevenness",
            ParameterKind::Twist => "twist",
            ParameterKind::CrossLevel => "cross_level",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ParameterKind::Gauge => "Gauge",
            ParameterKind::Alignment => "Alignment",
            ParameterKind::Unevenness => "Unevenness",
            ParameterKind::Twist => "Twist",
            ParameterKind::CrossLevel => "Cross Level",
        }
    }

    /// Largest change a single simulator tick may apply, in the parameter's unit
    pub fn max_step(&self) -> f64 {
        match self {
            ParameterKind::Gauge => 2.0,
            ParameterKind::Alignment => 1.0,
            ParameterKind::Unevenness => 1.5,
            ParameterKind::Twist => 0.8,
            ParameterKind::CrossLevel => 1.2,
        }
    }

    /// Seed reading the vehicle starts from: (value, threshold, min, max)
    fn seed(&self) -> (f64, f64, f64, f64) {
        match self {
            ParameterKind::Gauge => (1435.2, 1440.0, 1430.0, 1445.0),
            ParameterKind::Alignment => (2.1, 10.0, -5.0, 15.0),
            ParameterKind::Unevenness => (3.8, 15.0, 0.0, 20.0),
            ParameterKind::Twist => (1.2, 8.0, 0.0, 10.0),
            ParameterKind::CrossLevel => (4.5, 12.0, -8.0, 15.0),
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One parameter reading.
///
/// Fields are private so that `value` stays inside its bounds and `status`
/// always matches `classify(value, threshold)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterModel {
    value: f64,
    unit: String,
    status: Status,
    threshold: f64,
    min_bound: f64,
    max_bound: f64,
}

impl ParameterModel {
    pub fn new(value: f64, unit: impl Into<String>, threshold: f64, min_bound: f64, max_bound: f64) -> Self {
        let (min_bound, max_bound) = if min_bound <= max_bound {
            (min_bound, max_bound)
        } else {
            (max_bound, min_bound)
        };
        let value = value.clamp(min_bound, max_bound);
        Self {
            value,
            unit: unit.into(),
            status: classify(value, threshold),
            threshold,
            min_bound,
            max_bound,
        }
    }

    pub fn seeded(kind: ParameterKind) -> Self {
        let (value, threshold, min_bound, max_bound) = kind.seed();
        Self::new(value, "mm", threshold, min_bound, max_bound)
    }

    /// Copy of this reading with a new value, clamped and reclassified
    pub fn with_value(&self, value: f64) -> Self {
        let value = value.clamp(self.min_bound, self.max_bound);
        Self {
            value,
            status: classify(value, self.threshold),
            unit: self.unit.clone(),
            ..*self
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn min_bound(&self) -> f64 {
        self.min_bound
    }

    pub fn max_bound(&self) -> f64 {
        self.max_bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_gauge() {
        let gauge = ParameterModel::seeded(ParameterKind::Gauge);
        assert_eq!(gauge.value(), 1435.2);
        assert_eq!(gauge.threshold(), 1440.0);
        assert_eq!(gauge.unit(), "mm");
        // 1435.2 sits above 80% of 1440
        assert_eq!(gauge.status(), Status::Warning);
    }

    #[test]
    fn test_seeded_parameters_within_bounds() {
        for kind in ParameterKind::ALL {
            let model = ParameterModel::seeded(kind);
            assert!(model.min_bound() <= model.value() && model.value() <= model.max_bound());
        }
    }

    #[test]
    fn test_with_value_clamps_and_reclassifies() {
        let twist = ParameterModel::seeded(ParameterKind::Twist);
        let high = twist.with_value(42.0);
        assert_eq!(high.value(), 10.0);
        assert_eq!(high.status(), Status::Critical);

        let low = twist.with_value(-3.0);
        assert_eq!(low.value(), 0.0);
        assert_eq!(low.status(), Status::Normal);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ParameterKind::CrossLevel.name(), "cross_level");
        assert_eq!(ParameterKind::CrossLevel.title(), "Cross Level");
        assert_eq!(ParameterKind::Unevenness.max_step(), 1.5);
    }
}
