//! CLI argument parsing for conveyor.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Conveyor: organization-wide conventions for JVM builds.
///
/// A build is described by `conveyor.yaml`:
/// - every project gets default repositories and a group from its position
/// - Java projects get a shared layout and patched Eclipse metadata
/// - task configuration is applied once the task graph is final
#[derive(Parser, Debug)]
#[command(name = "conveyor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in this directory.
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Increase log output (repeatable: -v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for conveyor.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a default build description.
    ///
    /// Writes `conveyor.yaml` if it does not exist yet.
    Init(InitArgs),

    /// List the projects of the build.
    ///
    /// Shows each project's path, kind, group and Eclipse project name.
    Projects,

    /// Show the tasks a build would run, with their configuration.
    ///
    /// Finalizes the task graph and applies every convention, but runs
    /// nothing.
    Plan(TasksArgs),

    /// Run tasks and their dependencies.
    ///
    /// Eclipse metadata and `mkdirs` tasks write files; compile, test,
    /// exec and archive tasks print the command line they resolve to.
    Run(TasksArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Root project name (default: the directory name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for the `plan` and `run` commands.
#[derive(Parser, Debug)]
pub struct TasksArgs {
    /// Task names (`build`, selected in every project) or task paths
    /// (`:core:build`, exactly one task).
    #[arg(required = true)]
    pub tasks: Vec<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
