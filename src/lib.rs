//! railyard library
//!
//! Turns a freshly generated Rails skeleton into an opinionated starter
//! project by running an ordered pipeline of file mutations and shell
//! commands.

pub mod answers;
pub mod cli;
pub mod command_runner;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod process_guard;
pub mod prompt;
pub mod recipe;
pub mod templates;

// Re-export main types for convenience
pub use answers::{Answers, CampfireNotifications};
pub use command_runner::{CommandOutput, CommandRunner, CommandSpec, ProcessRunner};
pub use config::ScaffoldConfig;
pub use engine::ops::{Executor, Operation, Workspace};
pub use engine::pipeline::{ConsoleReporter, Pipeline, Reporter, RunReport, SilentReporter, Step};
pub use engine::text::{Pattern, SubstituteMode};
pub use error::{OperationError, RailyardError, StepFailure};
pub use fetch::{Fetcher, HttpFetcher, RemoteSource};
pub use process_guard::{ChildRegistry, CommandProcessGroup};
pub use recipe::build_pipeline;
