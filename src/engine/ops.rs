//! Mutation operations against a project tree.
//!
//! `Operation` is the closed set of primitives a step is built from. The
//! `Executor` applies one operation at a time against a `Workspace`,
//! delegating commands to a `CommandRunner` and remote downloads to a
//! `Fetcher`.
//!
//! # Failure Contract
//!
//! | Operation | Fails with |
//! |-----------|-----------|
//! | Create | `PathAlreadyExists`, `Io` (missing parent) |
//! | Replace | `Io` (missing parent) |
//! | Append / Prepend | `FileNotFound` |
//! | InsertAfter / InsertBefore | `FileNotFound`, `PatternNotMatched` |
//! | Substitute / CommentOut | `FileNotFound` (zero matches is success) |
//! | Remove | never for an absent path |
//! | Chmod | `FileNotFound` |
//! | Fetch | `Fetch`, `Io` |
//! | Run | `CommandFailed`, `Spawn` |

use crate::command_runner::{CommandRunner, CommandSpec};
use crate::engine::text::{self, Pattern, SubstituteMode};
use crate::error::OperationError;
use crate::fetch::Fetcher;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single edit of the project tree or a delegated external command.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Write a new file
    Create { path: PathBuf, content: String },

    /// Remove (if present) then create
    Replace { path: PathBuf, content: String },

    /// Append to an existing file
    Append { path: PathBuf, content: String },

    /// Insert at the start of an existing file
    Prepend { path: PathBuf, content: String },

    /// Insert right after the first match of `anchor`
    InsertAfter {
        path: PathBuf,
        content: String,
        anchor: Pattern,
    },

    /// Insert right before the first match of `anchor`
    InsertBefore {
        path: PathBuf,
        content: String,
        anchor: Pattern,
    },

    /// Replace the first or every match of `pattern` with literal text
    Substitute {
        path: PathBuf,
        pattern: Pattern,
        replacement: String,
        mode: SubstituteMode,
    },

    /// Prefix lines matching `pattern` with a comment marker
    CommentOut { path: PathBuf, pattern: Pattern },

    /// Delete a file or directory tree
    Remove { path: PathBuf },

    /// Create a directory and any missing parents
    CreateDir { path: PathBuf },

    /// Set unix permission bits
    Chmod { path: PathBuf, mode: u32 },

    /// Download a file from the remote template source
    Fetch {
        remote_path: String,
        local_path: PathBuf,
    },

    /// Run an external command; non-zero exit is fatal
    Run(CommandSpec),
}

impl Operation {
    pub fn create(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::Create {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn replace(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::Replace {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn append(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::Append {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn prepend(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::Prepend {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn insert_after(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        anchor: Pattern,
    ) -> Self {
        Self::InsertAfter {
            path: path.into(),
            content: content.into(),
            anchor,
        }
    }

    pub fn insert_before(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        anchor: Pattern,
    ) -> Self {
        Self::InsertBefore {
            path: path.into(),
            content: content.into(),
            anchor,
        }
    }

    pub fn substitute(
        path: impl Into<PathBuf>,
        pattern: Pattern,
        replacement: impl Into<String>,
        mode: SubstituteMode,
    ) -> Self {
        Self::Substitute {
            path: path.into(),
            pattern,
            replacement: replacement.into(),
            mode,
        }
    }

    pub fn comment_out(path: impl Into<PathBuf>, pattern: Pattern) -> Self {
        Self::CommentOut {
            path: path.into(),
            pattern,
        }
    }

    pub fn remove(path: impl Into<PathBuf>) -> Self {
        Self::Remove { path: path.into() }
    }

    pub fn create_dir(path: impl Into<PathBuf>) -> Self {
        Self::CreateDir { path: path.into() }
    }

    pub fn chmod(path: impl Into<PathBuf>, mode: u32) -> Self {
        Self::Chmod {
            path: path.into(),
            mode,
        }
    }

    pub fn fetch(remote_path: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self::Fetch {
            remote_path: remote_path.into(),
            local_path: local_path.into(),
        }
    }

    pub fn run(spec: CommandSpec) -> Self {
        Self::Run(spec)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { path, content } => {
                write!(f, "Create({}, {} bytes)", path.display(), content.len())
            }
            Self::Replace { path, content } => {
                write!(f, "Replace({}, {} bytes)", path.display(), content.len())
            }
            Self::Append { path, content } => {
                write!(f, "Append({}, {} bytes)", path.display(), content.len())
            }
            Self::Prepend { path, content } => {
                write!(f, "Prepend({}, {} bytes)", path.display(), content.len())
            }
            Self::InsertAfter { path, anchor, .. } => {
                write!(f, "InsertAfter({}, after {})", path.display(), anchor)
            }
            Self::InsertBefore { path, anchor, .. } => {
                write!(f, "InsertBefore({}, before {})", path.display(), anchor)
            }
            Self::Substitute {
                path,
                pattern,
                replacement,
                mode,
            } => write!(
                f,
                "Substitute({}, {} -> {:?}, {})",
                path.display(),
                pattern,
                replacement,
                mode
            ),
            Self::CommentOut { path, pattern } => {
                write!(f, "CommentOut({}, {})", path.display(), pattern)
            }
            Self::Remove { path } => write!(f, "Remove({})", path.display()),
            Self::CreateDir { path } => write!(f, "CreateDir({})", path.display()),
            Self::Chmod { path, mode } => write!(f, "Chmod({}, {:o})", path.display(), mode),
            Self::Fetch {
                remote_path,
                local_path,
            } => write!(f, "Fetch({} -> {})", remote_path, local_path.display()),
            Self::Run(spec) => write!(f, "Run({})", spec),
        }
    }
}

/// The project tree being scaffolded.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a project-relative path against the root
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// Applies operations to a workspace.
pub struct Executor<'a> {
    workspace: &'a Workspace,
    commands: &'a mut dyn CommandRunner,
    fetcher: &'a dyn Fetcher,
}

impl<'a> Executor<'a> {
    pub fn new(
        workspace: &'a Workspace,
        commands: &'a mut dyn CommandRunner,
        fetcher: &'a dyn Fetcher,
    ) -> Self {
        Self {
            workspace,
            commands,
            fetcher,
        }
    }

    /// Apply a single operation.
    pub fn apply(&mut self, op: &Operation) -> Result<(), OperationError> {
        debug!("apply: {}", op);

        match op {
            Operation::Create { path, content } => self.create(path, content),
            Operation::Replace { path, content } => {
                self.remove(path)?;
                self.create(path, content)
            }
            Operation::Append { path, content } => {
                let current = self.read_existing(path)?;
                self.write(path, &format!("{}{}", current, content))
            }
            Operation::Prepend { path, content } => {
                let current = self.read_existing(path)?;
                self.write(path, &format!("{}{}", content, current))
            }
            Operation::InsertAfter {
                path,
                content,
                anchor,
            } => {
                let current = self.read_existing(path)?;
                let updated = text::insert_after(&current, anchor, content)
                    .ok_or_else(|| pattern_not_matched(path, anchor))?;
                self.write(path, &updated)
            }
            Operation::InsertBefore {
                path,
                content,
                anchor,
            } => {
                let current = self.read_existing(path)?;
                let updated = text::insert_before(&current, anchor, content)
                    .ok_or_else(|| pattern_not_matched(path, anchor))?;
                self.write(path, &updated)
            }
            Operation::Substitute {
                path,
                pattern,
                replacement,
                mode,
            } => {
                let current = self.read_existing(path)?;
                let (updated, count) = text::substitute(&current, pattern, replacement, *mode);
                if count == 0 {
                    debug!("substitute: no match for {} in {}", pattern, path.display());
                    return Ok(());
                }
                self.write(path, &updated)
            }
            Operation::CommentOut { path, pattern } => {
                let current = self.read_existing(path)?;
                let (updated, count) = text::comment_out(&current, pattern);
                if count == 0 {
                    return Ok(());
                }
                self.write(path, &updated)
            }
            Operation::Remove { path } => self.remove(path),
            Operation::CreateDir { path } => {
                let full = self.workspace.resolve(path);
                fs::create_dir_all(&full).map_err(|e| OperationError::io(full, e))
            }
            Operation::Chmod { path, mode } => self.chmod(path, *mode),
            Operation::Fetch {
                remote_path,
                local_path,
            } => {
                let bytes = self.fetcher.fetch(remote_path)?;
                let full = self.workspace.resolve(local_path);
                fs::write(&full, bytes).map_err(|e| OperationError::io(full, e))
            }
            Operation::Run(spec) => {
                let output = self.commands.run(spec, self.workspace.root())?;
                output.ensure_success(spec)
            }
        }
    }

    fn create(&self, path: &Path, content: &str) -> Result<(), OperationError> {
        let full = self.workspace.resolve(path);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => OperationError::PathAlreadyExists {
                    path: path.to_path_buf(),
                },
                _ => OperationError::io(full.clone(), e),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| OperationError::io(full, e))
    }

    fn remove(&self, path: &Path) -> Result<(), OperationError> {
        let full = self.workspace.resolve(path);
        let metadata = match fs::symlink_metadata(&full) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(OperationError::io(full, e)),
        };

        let result = if metadata.is_dir() {
            fs::remove_dir_all(&full)
        } else {
            fs::remove_file(&full)
        };
        result.map_err(|e| OperationError::io(full, e))
    }

    fn read_existing(&self, path: &Path) -> Result<String, OperationError> {
        let full = self.workspace.resolve(path);
        fs::read_to_string(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => OperationError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => OperationError::io(full.clone(), e),
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), OperationError> {
        let full = self.workspace.resolve(path);
        fs::write(&full, content).map_err(|e| OperationError::io(full, e))
    }

    fn chmod(&self, path: &Path, mode: u32) -> Result<(), OperationError> {
        use std::os::unix::fs::PermissionsExt;

        let full = self.workspace.resolve(path);
        if !full.exists() {
            return Err(OperationError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        fs::set_permissions(&full, fs::Permissions::from_mode(mode))
            .map_err(|e| OperationError::io(full, e))
    }
}

fn pattern_not_matched(path: &Path, anchor: &Pattern) -> OperationError {
    OperationError::PatternNotMatched {
        path: path.to_path_buf(),
        pattern: anchor.as_str().to_string(),
    }
}
