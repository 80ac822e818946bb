//! railyard - main entry point
//!
//! Parses the command line, collects answers, builds the recipe pipeline and
//! runs it against the project directory.

use anyhow::{Context, Result};
use railyard::answers::{Answers, CampfireNotifications};
use railyard::cli::{Cli, Commands, ProjectArgs};
use railyard::command_runner::ProcessRunner;
use railyard::config::ScaffoldConfig;
use railyard::engine::ops::{Executor, Workspace};
use railyard::engine::pipeline::ConsoleReporter;
use railyard::fetch::HttpFetcher;
use railyard::prompt::{StdioPrompter, collect_answers};
use railyard::{logging, process_guard, recipe};
use std::path::Path;
use tracing::{debug, error, info, warn};

fn main() -> Result<()> {
    logging::init();
    info!("railyard {} starting up", env!("CARGO_PKG_VERSION"));

    // Terminate spawned gem/bundle/git children if we are interrupted
    if let Err(e) = process_guard::init_signal_handlers() {
        warn!("Failed to initialize signal handlers: {}", e);
    }
    debug!("Signal handlers initialized");

    let cli = Cli::parse_args();

    match cli.command {
        Some(Commands::Validate { file }) => {
            info!("Validating answers file: {:?}", file);
            match Answers::load_from_file(&file) {
                Ok(answers) => match answers.validate() {
                    Ok(()) => println!("✓ Answers file is valid: {}", file.display()),
                    Err(e) => {
                        error!("Answers validation failed: {}", e);
                        eprintln!("✗ Answers validation failed: {}", e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    error!("Failed to load answers file: {:#}", e);
                    eprintln!("✗ Failed to load answers file: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Answers { save }) => {
            let answers = prompt_for_answers()?;
            answers.save_to_file(&save)?;
            println!("✓ Answers saved to {}", save.display());
        }
        Some(Commands::Plan {
            project,
            with_campfire,
        }) => run_plan(&project, with_campfire)?,
        Some(Commands::Apply { project, answers }) => run_apply(&project, answers.as_deref())?,
        None => {
            info!("No command specified, applying the recipe");
            run_apply(&cli.project, cli.answers.as_deref())?;
        }
    }

    Ok(())
}

fn prompt_for_answers() -> Result<Answers> {
    let mut prompter = StdioPrompter::stdio();
    let answers = collect_answers(&mut prompter)?;
    answers.validate()?;
    Ok(answers)
}

fn scaffold_config(project: &ProjectArgs) -> Result<ScaffoldConfig> {
    let config = ScaffoldConfig::new(&project.project_dir, project.app_name.clone())
        .with_context(|| format!("Invalid project directory {:?}", project.project_dir))?
        .with_skip_test_dir_removal(project.skip_test_dir);
    Ok(config)
}

fn run_plan(project: &ProjectArgs, with_campfire: bool) -> Result<()> {
    let config = scaffold_config(project)?;
    let answers = Answers {
        campfire: with_campfire.then(|| CampfireNotifications {
            subdomain: "<subdomain>".to_string(),
            api_key: "<api key>".to_string(),
            room_id: "0".to_string(),
        }),
        ..Answers::default()
    };

    let pipeline = recipe::build_pipeline(&config, &answers)?;
    print!("{}", pipeline.summary());
    Ok(())
}

fn run_apply(project: &ProjectArgs, answers_file: Option<&Path>) -> Result<()> {
    let config = scaffold_config(project)?;

    let answers = match answers_file {
        Some(path) => {
            info!("Using answers from {:?}", path);
            let answers = Answers::load_from_file(path)?;
            answers.validate()?;
            answers
        }
        None => prompt_for_answers()?,
    };
    info!("Integrations: {}", answers.integrations());

    let pipeline = recipe::build_pipeline(&config, &answers)?;
    info!(
        "Scaffolding {} in {} ({} steps)",
        config.app_name,
        config.project_dir.display(),
        pipeline.len()
    );

    let workspace = Workspace::new(&config.project_dir);
    let fetcher = HttpFetcher::new(config.remote.clone())?;
    let mut runner = ProcessRunner::new();
    let mut executor = Executor::new(&workspace, &mut runner, &fetcher);
    let mut reporter = ConsoleReporter::stdout();

    match pipeline.run(&mut executor, &mut reporter) {
        Ok(report) => {
            println!(
                "\n✓ {} scaffolded: {} steps, {} operations",
                config.app_name,
                report.completed.len(),
                report.operations
            );
            Ok(())
        }
        Err(failure) => {
            eprintln!("✗ Step '{}' failed: {}", failure.label, failure.cause);
            std::process::exit(1);
        }
    }
}
