//! Tasks: named, typed units of work created by the host build.
//!
//! A task's identity (name, path, type) is fixed at creation. Only its
//! configuration is mutable: option groups, dependencies, and finalizers
//! that run after the task's own work.

mod options;
pub mod types;


pub use options::{ArchiveOptions, CompileOptions, ForkOptions, TaskOptions, TestOptions};
pub use types::TaskType;

use crate::error::{ConveyorError, Result};
use crate::project::ProjectId;
use std::fmt;
use std::path::{Path, PathBuf};

/// What the host does when the task executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskWork {
    /// Aggregates its dependencies; does nothing itself.
    Lifecycle,
    /// Compiles one source set.
    Compile { source_set: String },
    Test,
    Exec,
    Archive,
    /// Deletes files relative to the project directory.
    Delete { targets: Vec<PathBuf> },
    GenerateJdtPrefs,
    GenerateProjectFile,
    GenerateClasspath,
    MkDirs,
}

/// Where a finalizer runs.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext<'a> {
    pub task_path: &'a str,
    pub project_path: &'a str,
    pub project_dir: &'a Path,
}

/// An action appended to a task, run after the task's own work.
pub type Finalizer = Box<dyn Fn(&TaskContext<'_>) -> Result<()>>;

/// Task path from the owning project's path and the task name.
pub fn task_path(project_path: &str, name: &str) -> String {
    if project_path == ":" {
        format!(":{}", name)
    } else {
        format!("{}:{}", project_path, name)
    }
}

pub struct Task {
    name: String,
    path: String,
    project: ProjectId,
    task_type: &'static TaskType,
    work: TaskWork,
    pub group: Option<String>,
    pub description: Option<String>,
    depends_on: Vec<String>,
    options: TaskOptions,
    finalizers: Vec<Finalizer>,
    baseline: Option<Baseline>,
}

/// Configuration a task had once its project was evaluated, before any
/// graph listener touched it. Finalizers only ever grow, so their count is
/// enough to roll them back.
#[derive(Debug, Clone)]
struct Baseline {
    group: Option<String>,
    description: Option<String>,
    depends_on: Vec<String>,
    options: TaskOptions,
    finalizers: usize,
}

impl Task {
    pub fn new(
        project: ProjectId,
        project_path: &str,
        name: impl Into<String>,
        task_type: &'static TaskType,
        work: TaskWork,
    ) -> Self {
        let name = name.into();
        Self {
            path: task_path(project_path, &name),
            name,
            project,
            task_type,
            work,
            group: None,
            description: None,
            depends_on: Vec::new(),
            options: TaskOptions::for_type(task_type),
            finalizers: Vec::new(),
            baseline: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified path, e.g. `:services:billing:compileJava`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }

    pub fn task_type(&self) -> &'static TaskType {
        self.task_type
    }

    pub fn work(&self) -> &TaskWork {
        &self.work
    }

    pub fn options(&self) -> &TaskOptions {
        &self.options
    }

    /// Make this task run after `task`, given as a sibling name or a full
    /// task path. Repeated calls with the same task are ignored.
    pub fn depends_on(&mut self, task: impl Into<String>) {
        let task = task.into();
        if !self.depends_on.contains(&task) {
            self.depends_on.push(task);
        }
    }

    pub fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    /// Append an action that runs after the task's work.
    pub fn do_last<F>(&mut self, action: F)
    where
        F: Fn(&TaskContext<'_>) -> Result<()> + 'static,
    {
        self.finalizers.push(Box::new(action));
    }

    pub fn finalizers(&self) -> &[Finalizer] {
        &self.finalizers
    }

    pub fn compile_options_mut(&mut self) -> Result<&mut CompileOptions> {
        let path = &self.path;
        self.options
            .compile
            .as_mut()
            .ok_or_else(|| missing_group(path, "compile options"))
    }

    pub fn fork_options_mut(&mut self) -> Result<&mut ForkOptions> {
        let path = &self.path;
        self.options
            .fork
            .as_mut()
            .ok_or_else(|| missing_group(path, "JVM fork options"))
    }

    pub fn test_options_mut(&mut self) -> Result<&mut TestOptions> {
        let path = &self.path;
        self.options
            .test
            .as_mut()
            .ok_or_else(|| missing_group(path, "test options"))
    }

    pub fn archive_options_mut(&mut self) -> Result<&mut ArchiveOptions> {
        let path = &self.path;
        self.options
            .archive
            .as_mut()
            .ok_or_else(|| missing_group(path, "archive options"))
    }

    /// Merge `META-INF/services` descriptors from all inputs. Only fat-jar
    /// tasks have this capability.
    pub fn merge_service_files(&mut self) -> Result<()> {
        if !types::SHADOW_JAR.is_assignable_from(self.task_type) {
            return Err(ConveyorError::ConfigurationFailure(format!(
                "task '{}' of type {} cannot merge service files",
                self.path, self.task_type
            )));
        }
        self.archive_options_mut()?.merge_service_files = true;
        Ok(())
    }
}

impl Task {
    /// Remember the current configuration as the starting point of every
    /// later invocation.
    pub(crate) fn record_baseline(&mut self) {
        self.baseline = Some(Baseline {
            group: self.group.clone(),
            description: self.description.clone(),
            depends_on: self.depends_on.clone(),
            options: self.options.clone(),
            finalizers: self.finalizers.len(),
        });
    }

    /// Drop everything configured since [`Task::record_baseline`]. A task
    /// without a baseline is left alone.
    pub(crate) fn restore_baseline(&mut self) {
        let Some(baseline) = self.baseline.take() else {
            return;
        };
        self.group = baseline.group;
        self.description = baseline.description;
        self.depends_on = baseline.depends_on;
        self.options = baseline.options;
        self.finalizers.truncate(baseline.finalizers);
    }
}

fn missing_group(path: &str, group: &str) -> ConveyorError {
    ConveyorError::ConfigurationFailure(format!("task '{}' has no {}", path, group))
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("path", &self.path)
            .field("type", &self.task_type.name())
            .field("work", &self.work)
            .field("depends_on", &self.depends_on)
            .field("options", &self.options)
            .field("finalizers", &self.finalizers.len())
            .finish()
    }
}
