// Export seam - Formatting of recorded history is delegated to an adapter
use crate::domain::history::HistoryBuffer;
use crate::domain::position::PositionModel;
use crate::domain::snapshot::ParameterSet;
use chrono::{DateTime, Utc};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xml,
    Database,
}

/// Operator actions that only produce a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    Diagnostics,
    Report,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
    #[error("unknown system action: {0}")]
    UnknownAction(String),
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            "database" => Ok(ExportFormat::Database),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl FromStr for SystemAction {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diagnostics" => Ok(SystemAction::Diagnostics),
            "report" => Ok(SystemAction::Report),
            other => Err(ExportError::UnknownAction(other.to_string())),
        }
    }
}

/// Everything a formatter may read. History is walked oldest first.
pub struct ExportData<'a> {
    pub history: &'a HistoryBuffer,
    pub parameters: &'a ParameterSet,
    pub position: &'a PositionModel,
    pub exported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportArtifact {
    File {
        filename: String,
        mime_type: &'static str,
        content: String,
    },
    /// Acknowledgement only, nothing was written anywhere
    Notice(String),
}

pub trait ExportFormatter: Send + Sync {
    fn export(&self, format: ExportFormat, data: ExportData<'_>) -> ExportArtifact;

    /// Always an `ExportArtifact::Notice`
    fn action_notice(&self, action: SystemAction) -> ExportArtifact;
}
