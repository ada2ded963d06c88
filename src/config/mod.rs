//! Build description model for conveyor.
//!
//! This module defines the Config struct that represents `conveyor.yaml` at
//! the build root. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), defaults for every field, and validation of the
//! project layout.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{ProjectConfig, ProjectKind, RepositoryConfig};

/// File name of the build description.
pub const CONFIG_FILE: &str = "conveyor.yaml";
