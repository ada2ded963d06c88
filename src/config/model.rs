//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Build description.
///
/// This struct represents the contents of `conveyor.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Naming
    // =========================================================================
    /// Name of the root project; the build root directory name when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_project: Option<String>,

    /// Base package; `mkdirs` creates it below every source directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_package: Option<String>,

    // =========================================================================
    // Sources
    // =========================================================================
    /// Repositories for every project. When unset, the default list is
    /// installed (Maven Central, JCenter, Google).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<RepositoryConfig>>,

    // =========================================================================
    // IDE settings
    // =========================================================================
    /// Eclipse output root relative to each project (default: "build-eclipse").
    #[serde(default = "default_eclipse_output_dir")]
    pub eclipse_output_dir: String,

    // =========================================================================
    // Projects
    // =========================================================================
    /// Declared projects. Ancestors that are not declared are created as
    /// plain grouping projects.
    pub projects: Vec<ProjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_project: None,
            base_package: None,
            repositories: None,
            eclipse_output_dir: default_eclipse_output_dir(),
            projects: Vec::new(),
        }
    }
}
