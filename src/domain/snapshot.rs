// Snapshot of all readings taken on one tick
use super::parameter::{ParameterKind, ParameterModel};
use serde::Serialize;
use std::collections::BTreeMap;

pub type ParameterSet = BTreeMap<ParameterKind, ParameterModel>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    timestamp_ms: i64,
    chainage_km: f64,
    parameters: ParameterSet,
}

impl Snapshot {
    pub fn new(timestamp_ms: i64, chainage_km: f64, parameters: ParameterSet) -> Self {
        Self {
            timestamp_ms,
            chainage_km,
            parameters,
        }
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn chainage_km(&self) -> f64 {
        self.chainage_km
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn parameter(&self, kind: ParameterKind) -> Option<&ParameterModel> {
        self.parameters.get(&kind)
    }

    /// Value of one parameter, `NaN` when the snapshot does not carry it
    pub fn value_of(&self, kind: ParameterKind) -> f64 {
        self.parameter(kind).map(ParameterModel::value).unwrap_or(f64::NAN)
    }
}

/// Full parameter set at seed values
pub fn seeded_parameters() -> ParameterSet {
    ParameterKind::ALL
        .into_iter()
        .map(|kind| (kind, ParameterModel::seeded(kind)))
        .collect()
}
