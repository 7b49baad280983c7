// Threshold classification for track geometry readings
use serde::Serialize;
use std::fmt;

/// Fraction of the threshold above which a reading is flagged as a warning.
pub const WARNING_BAND: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Warning,
    Critical,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }

    /// Badge text as shown on parameter cards ("Normal", "Warning", "Critical")
    pub fn label(&self) -> &'static str {
        match self {
            Status::Normal => "Normal",
            Status::Warning => "Warning",
            Status::Critical => "Critical",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a reading against its threshold.
///
/// Only the positive band is checked: a reading far below zero is always `Normal`.
pub fn classify(value: f64, threshold: f64) -> Status {
    if value > threshold {
        Status::Critical
    } else if value > threshold * WARNING_BAND {
        Status::Warning
    } else {
        Status::Normal
    }
}
