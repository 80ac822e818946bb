//! Scaffolding run configuration
//!
//! Everything the recipe needs besides the answers: where the project lives,
//! what it is called, which optional edits to skip, where remote template
//! files come from, and the secret generated for `.env`.

use crate::error::{RailyardError, Result};
use crate::fetch::RemoteSource;
use heck::ToUpperCamelCase;
use rand::RngCore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Random bytes in a generated `SECRET_KEY_BASE` (hex doubles the length)
pub const SECRET_KEY_BYTES: usize = 64;

#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Root of the Rails skeleton being scaffolded
    pub project_dir: PathBuf,
    /// Application name as given to `rails new`
    pub app_name: String,
    /// Keep the stock `test/` directory when installing Rspec (`-T`)
    pub skip_test_dir_removal: bool,
    pub remote: RemoteSource,
    pub secret_key_base: String,
}

impl ScaffoldConfig {
    /// Build a config for `project_dir`.
    ///
    /// The directory must exist. Without an explicit `app_name` the final
    /// component of the canonical path is used.
    pub fn new(project_dir: impl AsRef<Path>, app_name: Option<String>) -> Result<Self> {
        let dir = project_dir.as_ref();
        if !dir.is_dir() {
            return Err(RailyardError::config(format!(
                "project directory {} does not exist",
                dir.display()
            )));
        }
        let project_dir = dir.canonicalize()?;

        let app_name = match app_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => name.trim().to_string(),
            None => project_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    RailyardError::config(format!(
                        "cannot derive an app name from {}",
                        project_dir.display()
                    ))
                })?,
        };

        debug!("app name {:?} in {}", app_name, project_dir.display());

        Ok(Self {
            project_dir,
            app_name,
            skip_test_dir_removal: false,
            remote: RemoteSource::from_env(),
            secret_key_base: generate_secret_key_base(),
        })
    }

    pub fn with_skip_test_dir_removal(mut self, skip: bool) -> Self {
        self.skip_test_dir_removal = skip;
        self
    }

    pub fn with_remote(mut self, remote: RemoteSource) -> Self {
        self.remote = remote;
        self
    }

    /// `my_app` -> `MyApp`
    pub fn camelized(&self) -> String {
        self.app_name.to_upper_camel_case()
    }

    /// `My App` -> `my-app`
    pub fn parameterized(&self) -> String {
        parameterize(&self.app_name)
    }
}

/// Lowercase, collapse every run of characters outside `[a-z0-9_-]` into a
/// single `-`, and trim leading/trailing `-`.
pub fn parameterize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }

    let mut collapsed = String::with_capacity(out.len());
    for c in out.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.trim_matches('-').to_string()
}

/// Fresh hex-encoded secret for `SECRET_KEY_BASE`
pub fn generate_secret_key_base() -> String {
    let mut bytes = [0u8; SECRET_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
