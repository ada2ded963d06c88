//! Configuration types and defaults for conveyor.
//!
//! This module defines enums, nested records, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};

/// Which conventions a project receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// A Java library (default for declared projects).
    #[default]
    Library,
    /// A runnable Java application packaged as a fat jar.
    Application,
    /// No conventions beyond the common ones; used for grouping projects.
    None,
}

impl ProjectKind {
    /// Parse a project kind from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "library" => Some(Self::Library),
            "application" => Some(Self::Application),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectKind::Library => write!(f, "library"),
            ProjectKind::Application => write!(f, "application"),
            ProjectKind::None => write!(f, "none"),
        }
    }
}

/// A package/dependency source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub name: String,
    pub url: String,
}

/// One declared project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Colon-delimited project path, e.g. `:services:billing`.
    pub path: String,

    #[serde(default)]
    pub kind: ProjectKind,

    /// Paths of projects this one depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    #[serde(default = "default_source_sets")]
    pub source_sets: Vec<String>,

    /// Extra JVM arguments for applications. Each entry is split with shell
    /// quoting rules, so `-Dgreeting='hello world'` stays one argument.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jvm_args: Vec<String>,

    /// Entry point of an application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
}

impl ProjectConfig {
    pub fn new(path: impl Into<String>, kind: ProjectKind) -> Self {
        Self {
            path: path.into(),
            kind,
            depends_on: Vec::new(),
            source_sets: default_source_sets(),
            jvm_args: Vec::new(),
            main_class: None,
        }
    }
}

/// Repositories installed when the build description names none.
pub fn default_repositories() -> Vec<RepositoryConfig> {
    vec![
        RepositoryConfig {
            name: "MavenCentral".to_string(),
            url: "https://repo.maven.apache.org/maven2/".to_string(),
        },
        RepositoryConfig {
            name: "BintrayJCenter".to_string(),
            url: "https://jcenter.bintray.com/".to_string(),
        },
        RepositoryConfig {
            name: "Google".to_string(),
            url: "https://dl.google.com/dl/android/maven2/".to_string(),
        },
    ]
}

// Default value functions for serde
pub(crate) fn default_source_sets() -> Vec<String> {
    vec!["main".to_string(), "test".to_string()]
}
pub(crate) fn default_eclipse_output_dir() -> String {
    "build-eclipse".to_string()
}
