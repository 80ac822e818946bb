//! Pipeline runner behaviour against a real temporary project tree.
//!
//! Operations are applied strictly in order, the first failure stops the
//! run, and completed steps are never rolled back.

mod common;

use common::{FakeFetcher, FakeRunner, read};
use railyard::command_runner::CommandSpec;
use railyard::engine::ops::{Executor, Operation, Workspace};
use railyard::engine::pipeline::{ConsoleReporter, Pipeline, SilentReporter, Step};
use railyard::engine::text::{Pattern, SubstituteMode};
use railyard::error::{OperationError, StepFailure};
use railyard::RunReport;
use std::fs;
use tempfile::TempDir;

fn run_in(
    dir: &TempDir,
    pipeline: &Pipeline,
    runner: &mut FakeRunner,
) -> Result<RunReport, StepFailure> {
    let workspace = Workspace::new(dir.path());
    let fetcher = FakeFetcher::with_puma_files();
    let mut executor = Executor::new(&workspace, runner, &fetcher);
    pipeline.run(&mut executor, &mut SilentReporter)
}

fn single_step(ops: Vec<Operation>) -> Pipeline {
    let mut pipeline = Pipeline::new();
    pipeline.push(Step::new("only").extend(ops));
    pipeline
}

#[test]
fn test_create_append_replace_sequence() {
    let dir = TempDir::new().unwrap();
    let pipeline = single_step(vec![
        Operation::create("A.txt", "x"),
        Operation::append("A.txt", "y"),
        Operation::replace("A.txt", "z"),
    ]);

    let report = run_in(&dir, &pipeline, &mut FakeRunner::default()).unwrap();
    assert_eq!(read(dir.path(), "A.txt"), "z");
    assert_eq!(report.operations, 3);
    assert_eq!(report.completed, vec!["only".to_string()]);
}

#[test]
fn test_failure_keeps_earlier_steps_and_skips_later_ones() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = Pipeline::new();
    pipeline.push(Step::new("first").with(Operation::create("one.txt", "1")));
    pipeline.push(
        Step::new("second")
            .with(Operation::create("two.txt", "2"))
            .with(Operation::append("missing.txt", "never")),
    );
    pipeline.push(Step::new("third").with(Operation::create("three.txt", "3")));

    let failure = run_in(&dir, &pipeline, &mut FakeRunner::default()).unwrap_err();
    assert_eq!(failure.label, "second");
    assert_eq!(failure.index, 2);
    assert!(matches!(failure.cause, OperationError::FileNotFound { .. }));

    assert_eq!(read(dir.path(), "one.txt"), "1");
    // Partial effects of the failing step stay too
    assert_eq!(read(dir.path(), "two.txt"), "2");
    assert!(!dir.path().join("three.txt").exists());
}

#[test]
fn test_order_matters() {
    let body = |ops: Vec<Operation>| {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("f.txt"), "base\n").unwrap();
        run_in(&dir, &single_step(ops), &mut FakeRunner::default()).unwrap();
        read(dir.path(), "f.txt")
    };

    let append_first = body(vec![
        Operation::append("f.txt", "tail\n"),
        Operation::substitute("f.txt", Pattern::literal("tail"), "end", SubstituteMode::First),
    ]);
    let substitute_first = body(vec![
        Operation::substitute("f.txt", Pattern::literal("tail"), "end", SubstituteMode::First),
        Operation::append("f.txt", "tail\n"),
    ]);

    assert_eq!(append_first, "base\nend\n");
    assert_eq!(substitute_first, "base\ntail\n");
}

#[test]
fn test_replace_is_idempotent_append_is_not() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("r.txt"), "old").unwrap();
    fs::write(dir.path().join("a.txt"), "old").unwrap();
    fs::write(dir.path().join("i.txt"), "head\nbody\n").unwrap();

    let pipeline = single_step(vec![
        Operation::replace("r.txt", "new"),
        Operation::replace("r.txt", "new"),
        Operation::append("a.txt", "+"),
        Operation::append("a.txt", "+"),
        Operation::insert_after("i.txt", "x\n", Pattern::literal("head\n")),
        Operation::insert_after("i.txt", "x\n", Pattern::literal("head\n")),
    ]);
    run_in(&dir, &pipeline, &mut FakeRunner::default()).unwrap();

    assert_eq!(read(dir.path(), "r.txt"), "new");
    assert_eq!(read(dir.path(), "a.txt"), "old++");
    assert_eq!(read(dir.path(), "i.txt"), "head\nx\nx\nbody\n");
}

#[test]
fn test_insert_after_uses_first_match_and_fails_without_one() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("f.txt"), "mark\nmark\n").unwrap();

    let pipeline = single_step(vec![Operation::insert_after(
        "f.txt",
        "new\n",
        Pattern::literal("mark\n"),
    )]);
    run_in(&dir, &pipeline, &mut FakeRunner::default()).unwrap();
    assert_eq!(read(dir.path(), "f.txt"), "mark\nnew\nmark\n");

    let absent = single_step(vec![Operation::insert_before(
        "f.txt",
        "new\n",
        Pattern::regex("^nowhere$").unwrap(),
    )]);
    let failure = run_in(&dir, &absent, &mut FakeRunner::default()).unwrap_err();
    match failure.cause {
        OperationError::PatternNotMatched { path, pattern } => {
            assert_eq!(path, std::path::PathBuf::from("f.txt"));
            assert_eq!(pattern, "^nowhere$");
        }
        other => panic!("expected PatternNotMatched, got {other:?}"),
    }
    assert_eq!(read(dir.path(), "f.txt"), "mark\nnew\nmark\n");
}

#[test]
fn test_failed_command_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = Pipeline::new();
    pipeline.push(Step::new("install").with(Operation::run(
        CommandSpec::new("bundle").args(["install", "--local"]),
    )));
    pipeline.push(Step::new("after").with(Operation::create("after.txt", "")));

    let mut runner = FakeRunner::failing_on("bundle install --local");
    let failure = run_in(&dir, &pipeline, &mut runner).unwrap_err();

    assert_eq!(failure.label, "install");
    assert!(failure.cause.is_command_failure());
    match &failure.cause {
        OperationError::CommandFailed {
            command,
            exit_code,
            stderr,
        } => {
            assert_eq!(command, "bundle install --local");
            assert_eq!(*exit_code, Some(1));
            assert_eq!(stderr, "bundle exploded");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert!(!dir.path().join("after.txt").exists());
    assert_eq!(runner.calls, vec!["bundle install --local".to_string()]);
}

#[test]
fn test_comment_out_without_match_keeps_bytes() {
    let dir = TempDir::new().unwrap();
    let original = "line one\r\n\tline two   \n";
    fs::write(dir.path().join("f.rb"), original).unwrap();

    let pipeline = single_step(vec![Operation::comment_out(
        "f.rb",
        Pattern::regex("config.assets.debug = true").unwrap(),
    )]);
    run_in(&dir, &pipeline, &mut FakeRunner::default()).unwrap();
    assert_eq!(read(dir.path(), "f.rb"), original);
}

#[test]
fn test_fetch_writes_remote_bytes_and_reports_missing() {
    let dir = TempDir::new().unwrap();
    let pipeline = single_step(vec![
        Operation::create_dir("bin"),
        Operation::fetch("bin/restart", "bin/restart"),
        Operation::chmod("bin/restart", 0o755),
    ]);
    run_in(&dir, &pipeline, &mut FakeRunner::default()).unwrap();
    assert_eq!(read(dir.path(), "bin/restart"), "#!/bin/sh\nforeman start\n");

    let missing = single_step(vec![Operation::fetch("bin/missing", "bin/missing")]);
    let failure = run_in(&dir, &missing, &mut FakeRunner::default()).unwrap_err();
    assert!(matches!(failure.cause, OperationError::Fetch { .. }));
    assert!(!dir.path().join("bin/missing").exists());
}

#[test]
fn test_console_reporter_prints_banner_per_step() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = Pipeline::new();
    pipeline.push(Step::new("Add Rspec"));
    pipeline.push(Step::new("Add Webrat gem"));

    let workspace = Workspace::new(dir.path());
    let fetcher = FakeFetcher::default();
    let mut runner = FakeRunner::default();
    let mut executor = Executor::new(&workspace, &mut runner, &fetcher);
    let mut reporter = ConsoleReporter::new(Vec::new());
    pipeline.run(&mut executor, &mut reporter).unwrap();

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let rule = "#".repeat(80);
    assert!(out.starts_with(&format!("\n\n{rule}\nAdd Rspec...\n{rule}\n")));
    assert!(out.contains("\nAdd Webrat gem...\n"));
}
