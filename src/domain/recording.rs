// Recording state machine
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordingState {
    Active,
    Paused,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingCommand {
    Start,
    Pause,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {command} while recording is {from}")]
    Undefined {
        from: RecordingState,
        command: RecordingCommand,
    },
}

impl RecordingState {
    /// Only an active recording lets ticks mutate state
    pub fn permits_mutation(&self) -> bool {
        matches!(self, RecordingState::Active)
    }

    /// State reached by `command`, or `None` for an undefined edge
    pub fn next(&self, command: RecordingCommand) -> Option<RecordingState> {
        use RecordingCommand::*;
        use RecordingState::*;
        match (self, command) {
            (Active, Pause) => Some(Paused),
            (Active, Stop) => Some(Stopped),
            (Paused, Start) => Some(Active),
            (Paused, Stop) => Some(Stopped),
            (Stopped, Start) => Some(Active),
            _ => None,
        }
    }

    /// Whether `command` is a defined edge from this state
    pub fn permits(&self, command: RecordingCommand) -> bool {
        self.next(command).is_some()
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordingState::Active => "Active",
            RecordingState::Paused => "Paused",
            RecordingState::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl RecordingCommand {
    pub const ALL: [RecordingCommand; 3] = [RecordingCommand::Start, RecordingCommand::Pause, RecordingCommand::Stop];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(RecordingCommand::Start),
            "pause" => Some(RecordingCommand::Pause),
            "stop" => Some(RecordingCommand::Stop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordingCommand::Start => "start",
            RecordingCommand::Pause => "pause",
            RecordingCommand::Stop => "stop",
        }
    }
}

impl fmt::Display for RecordingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate deciding whether ticks may mutate engine state.
///
/// Transitions only happen through `apply`; there are no timeouts.
#[derive(Debug, Clone)]
pub struct RecordingController {
    state: RecordingState,
}

impl RecordingController {
    pub fn new() -> Self {
        Self {
            state: RecordingState::Active,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Apply a command. An undefined edge leaves the state unchanged.
    pub fn apply(&mut self, command: RecordingCommand) -> Result<RecordingState, TransitionError> {
        let next = self.state.next(command).ok_or(TransitionError::Undefined {
            from: self.state,
            command,
        })?;
        self.state = next;
        Ok(next)
    }
}

impl Default for RecordingController {
    fn default() -> Self {
        Self::new()
    }
}
