use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// railyard - scaffold a fresh Rails skeleton with the team's conventions
#[derive(Parser)]
#[command(name = "railyard")]
#[command(about = "Turns a freshly generated Rails app into a project with testing, quality and deployment tooling")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Project options for the default `apply` run
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Read answers from a JSON file instead of prompting
    #[arg(short, long)]
    pub answers: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options naming the project being scaffolded.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Root of the Rails skeleton
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Application name (defaults to the project directory's name)
    #[arg(long)]
    pub app_name: Option<String>,

    /// Keep the stock test/ directory when installing Rspec
    #[arg(short = 'T', long)]
    pub skip_test_dir: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the setup questions and run every step (the default)
    Apply {
        #[command(flatten)]
        project: ProjectArgs,

        /// Read answers from a JSON file instead of prompting
        #[arg(short, long)]
        answers: Option<PathBuf>,
    },
    /// List the steps and operations a run would apply, without touching disk
    Plan {
        #[command(flatten)]
        project: ProjectArgs,

        /// Plan as if TravisCI Campfire notifications were requested
        #[arg(long)]
        with_campfire: bool,
    },
    /// Ask the setup questions and save the answers to a file
    Answers {
        /// Where to write the answers
        #[arg(long)]
        save: PathBuf,
    },
    /// Validate an answers file
    Validate {
        /// Path to the answers file to validate
        file: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
