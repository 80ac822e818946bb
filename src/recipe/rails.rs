//! Rails-aware operation builders.
//!
//! Each helper expands a Rails generator action (`gem`, `environment`,
//! `route`, `initializer`, ...) into the plain operations that implement
//! it. Nothing here touches the disk.

use crate::command_runner::CommandSpec;
use crate::engine::ops::Operation;
use crate::engine::text::Pattern;
use crate::error::Result;
use std::path::Path;
use strum::{Display, EnumIter, EnumString};

pub const GEMFILE: &str = "Gemfile";
pub const APPLICATION_RB: &str = "config/application.rb";
pub const ROUTES_RB: &str = "config/routes.rb";

/// Matches the application class declaration in `config/application.rb`
const APPLICATION_CLASS_PATTERN: &str = r"(?i)class [a-z_:]+ < Rails::Application";
/// Matches the end of the `routes.draw do` line
const ROUTES_DRAW_PATTERN: &str = r"(?m)\.routes\.draw do\s*$";

/// Bundler groups used in the Gemfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum BundlerGroup {
    Development,
    Test,
    Production,
    /// Loaded only when `BUNDLER_INCLUDE_DEBUG_GROUP` is set
    Debug,
    /// Continuous testing (guard)
    Ct,
}

impl BundlerGroup {
    /// Ruby symbol form, e.g. `:test`
    pub fn symbol(&self) -> String {
        format!(":{}", self)
    }
}

/// Options rendered after the gem name in a Gemfile line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GemOptions {
    pub version: Option<String>,
    pub group: Vec<BundlerGroup>,
    pub require: Option<bool>,
}

impl GemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, requirement: impl Into<String>) -> Self {
        self.version = Some(requirement.into());
        self
    }

    pub fn group(mut self, group: BundlerGroup) -> Self {
        self.group.push(group);
        self
    }

    pub fn groups(mut self, groups: &[BundlerGroup]) -> Self {
        self.group.extend_from_slice(groups);
        self
    }

    pub fn require(mut self, require: bool) -> Self {
        self.require = Some(require);
        self
    }
}

fn quote(value: &str) -> String {
    if value.contains('\'') {
        format!("{:?}", value)
    } else {
        format!("'{}'", value)
    }
}

/// The line appended to the Gemfile, including its leading newline:
/// `\ngem 'rspec-rails', group: [:development, :test]`
pub fn gem_line(name: &str, options: &GemOptions) -> String {
    let mut parts = vec![quote(name)];
    if let Some(version) = &options.version {
        parts.push(quote(version));
    }
    match options.group.as_slice() {
        [] => {}
        [single] => parts.push(format!("group: {}", single.symbol())),
        many => {
            let symbols: Vec<String> = many.iter().map(BundlerGroup::symbol).collect();
            parts.push(format!("group: [{}]", symbols.join(", ")));
        }
    }
    if let Some(require) = options.require {
        parts.push(format!("require: {}", require));
    }
    format!("\ngem {}", parts.join(", "))
}

/// Declare a gem in the Gemfile
pub fn gem(name: &str, options: &GemOptions) -> Operation {
    Operation::append(GEMFILE, gem_line(name, options))
}

/// Declare a gem, install it, and refresh the lockfile from the local cache
pub fn install_gem(name: &str, options: &GemOptions) -> Vec<Operation> {
    vec![
        gem(name, options),
        command(&format!("gem install {}", name)),
        command("bundle install --local"),
    ]
}

/// Put a `source` line at the top of the Gemfile
pub fn add_source(url: &str) -> Operation {
    Operation::prepend(GEMFILE, format!("source {}\n", quote(url)))
}

/// Add a line to the application class body in `config/application.rb`
pub fn environment(data: &str) -> Result<Operation> {
    Ok(Operation::insert_after(
        APPLICATION_RB,
        format!("\n    {}", data),
        Pattern::regex(APPLICATION_CLASS_PATTERN)?,
    ))
}

/// Add a route at the top of the `routes.draw` block
pub fn route(code: &str) -> Result<Operation> {
    Ok(Operation::insert_after(
        ROUTES_RB,
        format!("\n  {}", code),
        Pattern::regex(ROUTES_DRAW_PATTERN)?,
    ))
}

/// Create a file, creating its parent directories first
pub fn create_file(path: &str, content: impl Into<String>) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(2);
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        ops.push(Operation::create_dir(parent));
    }
    ops.push(Operation::create(path, content));
    ops
}

/// `config/initializers/<name>`
pub fn initializer(name: &str, data: impl Into<String>) -> Vec<Operation> {
    create_file(&format!("config/initializers/{}", name), data)
}

/// `lib/<name>`
pub fn lib(name: &str, data: impl Into<String>) -> Vec<Operation> {
    create_file(&format!("lib/{}", name), data)
}

/// Run a whitespace-separated command line
pub fn command(line: &str) -> Operation {
    let mut words = line.split_whitespace();
    let program = words.next().unwrap_or_default();
    Operation::run(CommandSpec::new(program).args(words))
}

/// `rails generate <what>` through the project's own binstub
pub fn generate(what: &str) -> Operation {
    Operation::run(
        CommandSpec::new("ruby")
            .args(["bin/rails", "generate"])
            .args(what.split_whitespace()),
    )
}

pub fn git<I, S>(args: I) -> Operation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Operation::run(CommandSpec::new("git").args(args))
}
