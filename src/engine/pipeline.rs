//! Ordered, labelled steps and the runner that applies them.
//!
//! A `Pipeline` is a list of `Step`s; each step is a label plus an ordered
//! list of `Operation`s. The runner applies steps strictly in order and
//! stops at the first failing operation.
//!
//! # Failure Semantics
//!
//! - Steps before the failing one stay applied; nothing is rolled back
//! - Operations of the failing step before the failing one stay applied
//! - The returned `StepFailure` names the failing step's label

use crate::engine::ops::{Executor, Operation};
use crate::error::StepFailure;
use std::io::Write;
use tracing::{error, info, warn};

/// Width of the `#` rule around step banners
pub const BANNER_WIDTH: usize = 80;

/// A labelled group of operations.
#[derive(Debug, Clone)]
pub struct Step {
    pub label: String,
    pub ops: Vec<Operation>,
}

impl Step {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ops: Vec::new(),
        }
    }

    /// Append an operation
    pub fn with(mut self, op: Operation) -> Self {
        self.ops.push(op);
        self
    }

    /// Append an operation only when `condition` holds
    pub fn op_if(self, condition: bool, op: impl FnOnce() -> Operation) -> Self {
        if condition { self.with(op()) } else { self }
    }

    /// Append several operations
    pub fn extend(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.ops.extend(ops);
        self
    }

    /// Apply every operation in order, stopping at the first failure.
    fn apply(&self, index: usize, exec: &mut Executor<'_>) -> Result<usize, StepFailure> {
        for op in &self.ops {
            exec.apply(op).map_err(|cause| StepFailure {
                label: self.label.clone(),
                index,
                cause,
            })?;
        }
        Ok(self.ops.len())
    }
}

/// Observes step progress.
pub trait Reporter {
    /// Called before the first operation of a step. `index` is 1-based.
    fn step_started(&mut self, index: usize, total: usize, label: &str);

    fn step_finished(&mut self, _index: usize, _label: &str) {}
}

/// Prints the step banner to a writer, stdout by default.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Banner printed before each step
pub fn banner(label: &str) -> String {
    let rule = "#".repeat(BANNER_WIDTH);
    format!("\n\n{rule}\n{label}...\n{rule}\n")
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn step_started(&mut self, _index: usize, _total: usize, label: &str) {
        if let Err(e) = self
            .out
            .write_all(banner(label).as_bytes())
            .and_then(|()| self.out.flush())
        {
            warn!("Failed to print banner for '{}': {}", label, e);
        }
    }
}

/// Reporter that discards progress
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn step_started(&mut self, _index: usize, _total: usize, _label: &str) {}
}

/// Result of a fully successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Labels of completed steps, in order
    pub completed: Vec<String>,
    /// Total operations applied
    pub operations: usize,
}

/// An ordered sequence of steps.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Push a step only when `condition` holds
    pub fn push_if(&mut self, condition: bool, step: impl FnOnce() -> Step) {
        if condition {
            self.steps.push(step());
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Human-readable listing of every step and its operations
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{:>2}. {}\n", i + 1, step.label));
            for op in &step.ops {
                out.push_str(&format!("      {}\n", op));
            }
        }
        out
    }

    /// Apply all steps in order.
    pub fn run(
        &self,
        exec: &mut Executor<'_>,
        reporter: &mut dyn Reporter,
    ) -> Result<RunReport, StepFailure> {
        let total = self.steps.len();
        let mut report = RunReport::default();

        for (i, step) in self.steps.iter().enumerate() {
            let index = i + 1;
            reporter.step_started(index, total, &step.label);
            info!("[{}/{}] {}", index, total, step.label);

            match step.apply(index, exec) {
                Ok(applied) => {
                    report.operations += applied;
                    report.completed.push(step.label.clone());
                    reporter.step_finished(index, &step.label);
                }
                Err(failure) => {
                    error!("Step '{}' failed: {}", failure.label, failure.cause);
                    return Err(failure);
                }
            }
        }

        info!(
            "Completed {} step(s), {} operation(s)",
            report.completed.len(),
            report.operations
        );
        Ok(report)
    }
}
