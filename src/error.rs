//! Error handling module for railyard
//!
//! Provides the operation failure taxonomy, the step failure surfaced by the
//! pipeline runner, and the application-level error type.
//! All errors use thiserror for consistency.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single operation against the project tree failed.
#[derive(Error, Debug)]
pub enum OperationError {
    /// The target path had to exist but does not
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Anchor-based insertion found no matching location
    #[error("pattern {pattern:?} not found in {}", path.display())]
    PatternNotMatched { path: PathBuf, pattern: String },

    /// External process exited with a non-zero status or was killed by a signal
    #[error("`{command}` failed ({}){}", describe_exit(*exit_code), describe_stderr(stderr))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Creation targeted a path that already exists
    #[error("path already exists: {}", path.display())]
    PathAlreadyExists { path: PathBuf },

    /// Filesystem error while touching a path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External process could not be started at all
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote template retrieval failed
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl OperationError {
    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// True when the failure came from an external command rather than a file mutation
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. } | Self::Spawn { .. })
    }
}

/// The first failure of a pipeline run, tagged with the step that raised it.
#[derive(Error, Debug)]
#[error("step '{label}' failed: {cause}")]
pub struct StepFailure {
    /// Label of the failing step
    pub label: String,
    /// 1-based position of the failing step in the pipeline
    pub index: usize,
    /// Underlying operation failure
    #[source]
    pub cause: OperationError,
}

/// Main error type for railyard
#[derive(Error, Debug)]
pub enum RailyardError {
    /// A pipeline step failed
    #[error(transparent)]
    Step(#[from] StepFailure),

    /// Configuration errors (project dir, app name, environment)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (answers file values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Interactive prompt errors (closed stdin, unreadable input)
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An edit pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for railyard operations
pub type Result<T> = std::result::Result<T, RailyardError>;

impl RailyardError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a prompt error
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }
}
