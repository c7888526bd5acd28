//! Command-level errors
//!
//! Mirrors the four failure classes of a command run: malformed input, a
//! failed lookup, a transport failure and an unrecognized command.

use thiserror::Error;
use wfctl_ipc::IpcError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No command provided")]
    NoCommand,

    #[error("Command not recognized: {0}")]
    NotRecognized(String),

    #[error("Missing argument <{name}> (usage: {usage})")]
    MissingArgument { name: String, usage: String },

    #[error("Unexpected argument '{value}' (usage: {usage})")]
    UnexpectedArgument { value: String, usage: String },

    #[error("Invalid {label}: '{value}' (expected {expected})")]
    InvalidArgument {
        label: String,
        value: String,
        expected: String,
    },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Wayfire request failed: {0}")]
    Ipc(#[source] IpcError),

    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// A handler read an argument its command does not declare
    #[error("Argument <{0}> is not declared for this command")]
    Undeclared(&'static str),
}

impl CommandError {
    pub fn invalid(label: &str, value: &str, expected: impl Into<String>) -> Self {
        Self::InvalidArgument {
            label: label.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Process exit status for this error
    ///
    /// Malformed values and failed lookups are reported and the process exits
    /// normally; usage and transport failures exit with 1.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::NotFound { .. } => 0,
            _ => 1,
        }
    }

    /// Whether the command list should be shown alongside the error
    pub const fn wants_usage(&self) -> bool {
        matches!(self, Self::NoCommand | Self::NotRecognized(_))
    }
}

impl From<IpcError> for CommandError {
    fn from(err: IpcError) -> Self {
        match err {
            IpcError::NotFound { what } => Self::NotFound { what },
            other => Self::Ipc(other),
        }
    }
}
