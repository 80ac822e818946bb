//! External command execution
//!
//! Every gem, bundle, rails and git invocation goes through a
//! `CommandRunner`. The pipeline only sees the trait, so tests substitute a
//! recording runner and never touch the real toolchain.
//!
//! `ProcessRunner` is the real implementation:
//!
//! - Spawns the command in a new process group via `.in_new_process_group()`
//! - Registers the child PID with `ChildRegistry::global()` while it runs
//! - Inherits stdout/stderr so the user sees tool output live, unless the
//!   spec asks for capture

use crate::error::OperationError;
use crate::process_guard::{ChildRegistry, CommandProcessGroup};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// A command to run inside the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub capture_output: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            capture_output: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Capture stdout/stderr instead of streaming them to the terminal
    pub fn captured(mut self) -> Self {
        self.capture_output = true;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Output from a command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Captured standard output (empty when streamed)
    pub stdout: String,
    /// Captured standard error (empty when streamed)
    pub stderr: String,
    /// Exit code (None if terminated by signal)
    pub exit_code: Option<i32>,
    pub success: bool,
}

impl CommandOutput {
    /// Successful output with nothing captured
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            ..Self::default()
        }
    }

    /// Convert a non-zero exit into a `CommandFailed` error.
    pub fn ensure_success(&self, spec: &CommandSpec) -> Result<(), OperationError> {
        if self.success {
            Ok(())
        } else {
            Err(OperationError::CommandFailed {
                command: spec.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr.clone(),
            })
        }
    }
}

/// Runs external commands on behalf of the pipeline.
pub trait CommandRunner {
    /// Run `spec` with `cwd` as working directory.
    ///
    /// A non-zero exit is reported through `CommandOutput::success`, not as
    /// an error; `Err` means the command could not be run at all.
    fn run(&mut self, spec: &CommandSpec, cwd: &Path) -> Result<CommandOutput, OperationError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, spec: &CommandSpec, cwd: &Path) -> Result<CommandOutput, OperationError> {
        info!("run: {} (in {})", spec, cwd.display());

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .in_new_process_group();
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        if spec.capture_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let child = cmd.spawn().map_err(|source| OperationError::Spawn {
            command: spec.to_string(),
            source,
        })?;
        let pid = child.id();

        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.register(pid);
        }

        let waited = child.wait_with_output();

        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.unregister(pid);
        }

        let output = waited.map_err(|source| OperationError::Spawn {
            command: spec.to_string(),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            success: output.status.success(),
        };

        if result.success {
            debug!("{} exited successfully", spec.program);
        } else {
            warn!(
                "{} failed with exit code {}",
                spec,
                result
                    .exit_code
                    .map_or_else(|| "none".to_string(), |c| c.to_string())
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_spec_display_quotes_whitespace() {
        let spec = CommandSpec::new("git").args([
            "commit",
            "-a",
            "-m",
            "Initial checkin.  Built by thegarage-template Rails Generator",
        ]);
        assert_eq!(
            spec.to_string(),
            "git commit -a -m 'Initial checkin.  Built by thegarage-template Rails Generator'"
        );
        assert_eq!(CommandSpec::new("bundle").arg("").to_string(), "bundle ''");
    }

    #[test]
    fn test_ensure_success() {
        let spec = CommandSpec::new("gem").args(["install", "pry"]);
        assert!(CommandOutput::ok().ensure_success(&spec).is_ok());

        let failed = CommandOutput {
            stderr: "ERROR: could not find gem".to_string(),
            exit_code: Some(2),
            ..CommandOutput::default()
        };
        let err = failed.ensure_success(&spec).unwrap_err();
        assert!(err.is_command_failure());
        assert_eq!(
            err.to_string(),
            "`gem install pry` failed (exit code 2): ERROR: could not find gem"
        );
    }

    #[test]
    fn test_process_runner_captures_output_in_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Gemfile"), "").unwrap();

        let spec = CommandSpec::new("sh")
            .args(["-c", "ls; echo $RAILS_ENV >&2"])
            .env("RAILS_ENV", "test")
            .captured();
        let output = ProcessRunner::new().run(&spec, dir.path()).unwrap();

        assert!(output.success);
        assert_eq!(output.stdout.trim(), "Gemfile");
        assert_eq!(output.stderr.trim(), "test");
    }

    #[test]
    fn test_process_runner_reports_exit_code() {
        let dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("sh").args(["-c", "exit 3"]).captured();
        let output = ProcessRunner::new().run(&spec, dir.path()).unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
    }

    #[test]
    fn test_process_runner_missing_program_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("railyard-definitely-not-installed");
        let err = ProcessRunner::new().run(&spec, dir.path()).unwrap_err();
        assert!(matches!(err, OperationError::Spawn { .. }));
    }
}
