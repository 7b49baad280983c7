// Alert register - Track defect alerts and their acknowledgement
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertStatus {
    Active,
    Acknowledged,
    #[serde(rename = "Under Investigation")]
    UnderInvestigation,
}

impl AlertStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AlertStatus::Active => "Active",
            AlertStatus::Acknowledged => "Acknowledged",
            AlertStatus::UnderInvestigation => "Under Investigation",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: u32,
    pub time: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
    pub location: String,
    pub status: AlertStatus,
}

impl Alert {
    fn new(
        id: u32,
        time: &str,
        severity: Severity,
        category: &str,
        description: &str,
        location: &str,
        status: AlertStatus,
    ) -> Self {
        Self {
            id,
            time: time.to_string(),
            severity,
            category: category.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            status,
        }
    }
}

/// Alert list views; `acknowledged` selects by status, the rest by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertFilter {
    #[default]
    All,
    Critical,
    High,
    Medium,
    Acknowledged,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            AlertFilter::All => true,
            AlertFilter::Critical => alert.severity == Severity::Critical,
            AlertFilter::High => alert.severity == Severity::High,
            AlertFilter::Medium => alert.severity == Severity::Medium,
            AlertFilter::Acknowledged => alert.status == AlertStatus::Acknowledged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    #[error("no alert with id {0}")]
    Unknown(u32),
    #[error("alert {id} is {status}, only active alerts can be acknowledged")]
    NotActive { id: u32, status: AlertStatus },
}

/// Alerts raised along the line, newest first.
#[derive(Debug, Clone)]
pub struct AlertRegister {
    alerts: Vec<Alert>,
}

impl AlertRegister {
    pub fn seeded() -> Self {
        Self {
            alerts: vec![
                Alert::new(
                    1,
                    "10:45:32",
                    Severity::High,
                    "Track Geometry",
                    "Gauge widening detected",
                    "KM 1245.120",
                    AlertStatus::Active,
                ),
                Alert::new(
                    2,
                    "10:42:15",
                    Severity::Medium,
                    "Rail Wear",
                    "Lateral wear exceeding 0.15mm",
                    "KM 1244.890",
                    AlertStatus::Acknowledged,
                ),
                Alert::new(
                    3,
                    "10:38:47",
                    Severity::Critical,
                    "Track Alignment",
                    "Severe alignment deviation",
                    "KM 1244.650",
                    AlertStatus::UnderInvestigation,
                ),
            ],
        }
    }

    pub fn filter(&self, filter: AlertFilter) -> Vec<Alert> {
        self.alerts.iter().filter(|alert| filter.matches(alert)).cloned().collect()
    }

    /// Active -> Acknowledged. Any other status is left as it is.
    pub fn acknowledge(&mut self, id: u32) -> Result<&Alert, AlertError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|alert| alert.id == id)
            .ok_or(AlertError::Unknown(id))?;

        if alert.status != AlertStatus::Active {
            return Err(AlertError::NotActive {
                id,
                status: alert.status,
            });
        }
        alert.status = AlertStatus::Acknowledged;
        Ok(alert)
    }
}

impl Default for AlertRegister {
    fn default() -> Self {
        Self::seeded()
    }
}
