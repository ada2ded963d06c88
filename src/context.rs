//! Build root resolution for conveyor.
//!
//! This module provides the "environment resolution" layer that finds the
//! build root from any working directory and resolves the paths conveyor
//! keeps its own state in.
//!
//! All commands except `init` must use this module to locate the build, so
//! that invoking conveyor from inside a project directory still targets the
//! whole build.

use crate::config::CONFIG_FILE;
use crate::error::{ConveyorError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// State directory relative to the build root.
pub const STATE_DIR: &str = ".conveyor";

/// Resolved paths for a build. All paths are absolute.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Directory holding `conveyor.yaml`; the root project's directory.
    pub build_root: PathBuf,

    /// Absolute path to the state directory (`{build_root}/.conveyor/`).
    pub state_dir: PathBuf,
}

impl BuildContext {
    /// Resolve the build context from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildContext)` - Successfully resolved context
    /// * `Err(ConveyorError::UserError)` - If no `conveyor.yaml` is found (exit code 1)
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            ConveyorError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the build context from a specific directory, walking up
    /// until a directory containing `conveyor.yaml` is found.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Result<Self> {
        let cwd = absolute(cwd.as_ref())?;

        for dir in cwd.ancestors() {
            if dir.join(CONFIG_FILE).is_file() {
                return Ok(Self::at(dir));
            }
        }

        Err(ConveyorError::UserError(format!(
            "no {} found in '{}' or any parent directory.\n\n\
             Run `conveyor init` to create one.",
            CONFIG_FILE,
            cwd.display()
        )))
    }

    /// Context rooted at `build_root`, whether or not it holds a build
    /// description yet. Used by `init`.
    pub fn at<P: AsRef<Path>>(build_root: P) -> Self {
        let build_root = build_root.as_ref().to_path_buf();
        let state_dir = build_root.join(STATE_DIR);
        Self {
            build_root,
            state_dir,
        }
    }

    /// Get the path to the build description.
    pub fn config_path(&self) -> PathBuf {
        self.build_root.join(CONFIG_FILE)
    }

    /// Get the path to the build event log.
    pub fn events_file(&self) -> PathBuf {
        self.state_dir.join("events.ndjson")
    }

    /// Name of the build root directory, the fallback root project name.
    pub fn root_dir_name(&self) -> String {
        self.build_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|e| {
        ConveyorError::UserError(format!("failed to get current working directory: {}", e))
    })?;
    Ok(cwd.join(path))
}

/// Resolve the context of the build containing `dir`, or of the working
/// directory when `dir` is not given.
pub fn resolve_context(dir: Option<&Path>) -> Result<BuildContext> {
    match dir {
        Some(dir) => BuildContext::resolve_from(dir),
        None => BuildContext::resolve(),
    }
}
