//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::{ProjectConfig, ProjectKind};
use crate::error::{ConveyorError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static PROJECT_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(:[A-Za-z0-9_.-]+)+$").expect("Invalid project path regex"));

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ConveyorError::UserError)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConveyorError::UserError(format!(
                "failed to read build description '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                ConveyorError::UserError(format!("failed to parse build description: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ConveyorError::UserError(format!("failed to serialize build description: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - project paths match `:segment(:segment)*` and are unique
    /// - `depends_on` entries name a declared or implied project other than itself
    /// - `eclipse_output_dir` is a non-empty relative path
    /// - `jvm_args` entries split cleanly with shell quoting rules
    pub fn validate(&self) -> Result<()> {
        if self.eclipse_output_dir.trim().is_empty() {
            return Err(invalid("eclipse_output_dir must not be empty"));
        }
        if Path::new(&self.eclipse_output_dir).is_absolute() {
            return Err(invalid(format!(
                "eclipse_output_dir must be relative (found '{}')",
                self.eclipse_output_dir
            )));
        }

        if let Some(repositories) = &self.repositories {
            for repo in repositories {
                if repo.name.is_empty() || repo.url.is_empty() {
                    return Err(invalid("repositories entries need a name and a url"));
                }
            }
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if !PROJECT_PATH_REGEX.is_match(&project.path) {
                return Err(invalid(format!(
                    "invalid project path '{}' (expected e.g. ':services:billing')",
                    project.path
                )));
            }
            if !seen.insert(project.path.as_str()) {
                return Err(invalid(format!("project '{}' is declared twice", project.path)));
            }
            project.split_jvm_args()?;
        }

        let known: HashSet<String> = self.project_paths().into_iter().collect();
        for project in &self.projects {
            for dependency in &project.depends_on {
                if dependency == &project.path {
                    return Err(invalid(format!(
                        "project '{}' cannot depend on itself",
                        project.path
                    )));
                }
                if !known.contains(dependency) {
                    return Err(invalid(format!(
                        "project '{}' depends on unknown project '{}'",
                        project.path, dependency
                    )));
                }
            }
        }

        Ok(())
    }

    /// Every project path in the build, root excluded: declared projects and
    /// their implied ancestors, parents before children.
    pub fn project_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for project in &self.projects {
            let mut prefix = String::new();
            for segment in project.path.split(':').skip(1) {
                prefix.push(':');
                prefix.push_str(segment);
                if !paths.contains(&prefix) {
                    paths.push(prefix.clone());
                }
            }
        }
        paths
    }

    /// Declared settings of the project at `path`, if any.
    pub fn project(&self, path: &str) -> Option<&ProjectConfig> {
        self.projects.iter().find(|p| p.path == path)
    }

    /// Kind of the project at `path`; implied ancestors are `none`.
    pub fn kind_of(&self, path: &str) -> ProjectKind {
        self.project(path).map_or(ProjectKind::None, |p| p.kind)
    }
}

impl ProjectConfig {
    /// The configured JVM arguments, each entry split with shell quoting rules.
    pub fn split_jvm_args(&self) -> Result<Vec<String>> {
        let mut args = Vec::new();
        for entry in &self.jvm_args {
            let split = shell_words::split(entry).map_err(|e| {
                invalid(format!(
                    "project '{}' has malformed jvm_args entry '{}': {}",
                    self.path, entry, e
                ))
            })?;
            args.extend(split);
        }
        Ok(args)
    }
}

fn invalid(message: impl std::fmt::Display) -> ConveyorError {
    ConveyorError::UserError(format!("build description validation failed: {}", message))
}
