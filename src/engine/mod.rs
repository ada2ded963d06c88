//! Project convention engine.
//!
//! An engine is composed from conventions: functions that record task
//! configurators and project actions on it. Applying the engine to a project
//! runs, in order:
//!
//! 1. install the default repositories unless the project already has some
//! 2. assign the project's group from its position in the hierarchy
//! 3. run every project action in registration order
//! 4. register the engine as a task graph listener, which dispatches the
//!    registry once per build invocation
//!
//! The engine never looks at task types itself.

#[cfg(test)]
mod tests;

use crate::build::{Build, TaskGraph, TaskGraphListener};
use crate::config::types::default_repositories;
use crate::error::Result;
use crate::project::{ProjectId, Repository};
use crate::registry::{ConfiguratorRegistry, DispatchSummary};
use crate::task::{Task, TaskType};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// One-shot work run against a project when the engine is applied.
pub type ProjectAction = Box<dyn Fn(&mut Build, ProjectId) -> Result<()>>;

pub struct ConventionEngine {
    name: String,
    registry: ConfiguratorRegistry,
    project_actions: Vec<ProjectAction>,
    repositories: Vec<Repository>,
    last_invocation: Cell<Option<u64>>,
}

impl ConventionEngine {
    /// An engine with no conventions and the default repositories.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: ConfiguratorRegistry::new(),
            project_actions: Vec::new(),
            repositories: default_repositories()
                .into_iter()
                .map(|repo| Repository::new(repo.name, repo.url))
                .collect(),
            last_invocation: Cell::new(None),
        }
    }

    /// Add a convention.
    pub fn with<F>(mut self, convention: F) -> Self
    where
        F: FnOnce(&mut ConventionEngine),
    {
        convention(&mut self);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &ConfiguratorRegistry {
        &self.registry
    }

    pub fn register_by_type<F>(&mut self, task_type: &'static TaskType, action: F)
    where
        F: Fn(&mut Task) -> Result<()> + 'static,
    {
        self.registry.register_by_type(task_type, action);
    }

    pub fn register_by_name<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn(&mut Task) -> Result<()> + 'static,
    {
        self.registry.register_by_name(name, action);
    }

    pub fn register_project_action<F>(&mut self, action: F)
    where
        F: Fn(&mut Build, ProjectId) -> Result<()> + 'static,
    {
        self.project_actions.push(Box::new(action));
    }

    /// Apply the engine to one project.
    pub fn apply(self: &Rc<Self>, build: &mut Build, id: ProjectId) -> Result<()> {
        let group = build.tree().group_of(id);
        let project = build.project_mut(id);

        if project.repositories.is_empty() {
            project.repositories = self.repositories.clone();
        }
        project.group = group;
        debug!(engine = %self.name, project = project.path(), group = %project.group, "applying conventions");

        for action in &self.project_actions {
            action(build, id)?;
        }

        build.when_task_graph_ready(Rc::clone(self) as Rc<dyn TaskGraphListener>);
        Ok(())
    }
}

impl TaskGraphListener for ConventionEngine {
    fn graph_ready(&self, graph: &TaskGraph, tasks: Vec<&mut Task>) -> Result<DispatchSummary> {
        if self.last_invocation.get() == Some(graph.invocation()) {
            debug!(engine = %self.name, invocation = graph.invocation(), "already dispatched");
            return Ok(DispatchSummary::default());
        }
        self.last_invocation.set(Some(graph.invocation()));

        let summary = self.registry.dispatch(tasks)?;
        info!(engine = %self.name, applied = summary.applied, "conventions dispatched");
        Ok(summary)
    }
}

impl fmt::Debug for ConventionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionEngine")
            .field("name", &self.name)
            .field("registry", &self.registry)
            .field("project_actions", &self.project_actions.len())
            .field("repositories", &self.repositories)
            .finish()
    }
}
