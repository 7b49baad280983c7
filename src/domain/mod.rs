// Domain layer - Track geometry models and rules
pub mod alert;
pub mod classifier;
pub mod history;
pub mod parameter;
pub mod position;
pub mod recording;
pub mod snapshot;
