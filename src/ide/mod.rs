//! Eclipse metadata generated by the host.
//!
//! `.classpath` goes through the descriptor merge and its two-phase hooks;
//! `.project` and the JDT preference scaffold are written as generated.

mod classpath;
mod jdt;
mod project_file;

#[cfg(test)]
mod tests;

pub use classpath::{generate_classpath, merge_with_existing, write_classpath};
pub use jdt::{JAVA_VERSION, jdt_scaffold, write_jdt_prefs};
pub use project_file::{generate_project_file, write_project_file};

use crate::descriptor::DescriptorHooks;
use std::path::PathBuf;

pub const CLASSPATH_FILE: &str = ".classpath";
pub const PROJECT_FILE: &str = ".project";
pub const JDT_PREFS_FILE: &str = ".settings/org.eclipse.jdt.core.prefs";

/// Files removed by `cleanEclipse`, relative to the project directory.
pub fn generated_files() -> Vec<PathBuf> {
    [CLASSPATH_FILE, PROJECT_FILE, JDT_PREFS_FILE]
        .iter()
        .map(PathBuf::from)
        .collect()
}

/// Eclipse settings of one project.
#[derive(Debug)]
pub struct EclipseModel {
    pub project_name: String,
    /// Default output folder relative to the project directory.
    pub default_output_dir: PathBuf,
    pub classpath: DescriptorHooks,
}

impl EclipseModel {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            default_output_dir: PathBuf::from("bin"),
            classpath: DescriptorHooks::new(),
        }
    }
}
