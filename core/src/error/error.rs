use thiserror::Error;

use super::CapabilityError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("server failed: {0}")]
    Server(String),
    #[error("task failed: {0}")]
    Task(#[from] TaskError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Every way a single request can fail. One request yields exactly one of these
/// or a success.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task not recognized.")]
    NotRecognized,
    #[error("insufficient input: {0}")]
    InsufficientInput(String),
    #[error("{0}")]
    Capability(#[from] CapabilityError),
    #[error("File not found.")]
    NotFound(String),
    #[error("{0}")]
    Handler(String),
}

impl TaskError {
    pub fn handler(err: impl std::fmt::Display) -> Self {
        Self::Handler(err.to_string())
    }

    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotRecognized => "TASK_NOT_RECOGNIZED",
            Self::InsufficientInput(_) => "INSUFFICIENT_INPUT",
            Self::Capability(_) => "CAPABILITY_FAILURE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Handler(_) => "HANDLER_FAULT",
        }
    }

    /// Client-side mistakes as opposed to failures while executing a handler.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotRecognized | Self::NotFound(_))
    }
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the context chain on one line.
        Self::Handler(format!("{err:#}"))
    }
}

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        Self::Handler(err.to_string())
    }
}
