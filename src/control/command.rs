use std::fmt;
use std::str::FromStr;

use crate::control::error::ControlParseError;
use crate::tasks::Operation;

/// Console-style command addressed to one named task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Activate a registered task.
    Start,
    Pause,
    Resume,
    /// Terminate an active or paused task.
    Stop,
    /// Report the current state without changing it.
    State,
}

impl ControlCommand {
    pub const ALL: [ControlCommand; 5] = [
        ControlCommand::Start,
        ControlCommand::Pause,
        ControlCommand::Resume,
        ControlCommand::Stop,
        ControlCommand::State,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ControlCommand::Start => "start",
            ControlCommand::Pause => "pause",
            ControlCommand::Resume => "resume",
            ControlCommand::Stop => "stop",
            ControlCommand::State => "state",
        }
    }

    /// Lifecycle operation performed by the command; `None` for queries.
    pub fn operation(self) -> Option<Operation> {
        match self {
            ControlCommand::Start => Some(Operation::Activate),
            ControlCommand::Pause => Some(Operation::Pause),
            ControlCommand::Resume => Some(Operation::Resume),
            ControlCommand::Stop => Some(Operation::Terminate),
            ControlCommand::State => None,
        }
    }

    /// One-line help listing accepted words.
    pub fn usage() -> String {
        let words: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
        format!("usage: <task> <{}>", words.join("|"))
    }
}

impl FromStr for ControlCommand {
    type Err = ControlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(word))
            .ok_or_else(|| ControlParseError::UnknownCommand {
                word: word.to_string(),
            })
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
