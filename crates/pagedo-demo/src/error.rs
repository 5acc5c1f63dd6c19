#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("unknown command: {input} (try `help`)")]
    UnknownCommand { input: String },

    #[error("no row {row} on this page (rows 1-{shown})")]
    NoSuchRow { row: usize, shown: usize },

    #[error("not editing; use `edit <row>` first")]
    NotEditing,

    #[error("log filter error: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::LogFilter(_) => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether a session can keep going after reporting this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. }
                | Self::NoSuchRow { .. }
                | Self::NotEditing
                | Self::InvalidArgument { .. }
        )
    }
}
