//! The host build.
//!
//! Holds the project tree, applies plugins, runs after-evaluate hooks,
//! finalizes the task graph of an invocation and executes it. Convention
//! engines plug in through [`Build::when_task_graph_ready`].

mod executor;
pub mod graph;
pub mod plugins;

#[cfg(test)]
mod tests;

pub use executor::{TaskOutcome, command_line, mkdirs_targets};
pub use graph::{TaskGraph, TaskGraphListener};

use crate::config::Config;
use crate::error::{ConveyorError, Result};
use crate::project::{Project, ProjectId, ProjectTree, Repository};
use crate::registry::DispatchSummary;
use crate::task::Task;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

/// Work deferred until every project has been configured.
pub type AfterEvaluate = Box<dyn FnOnce(&mut Build, ProjectId) -> Result<()>>;

/// A finalized, configured task graph.
#[derive(Debug)]
pub struct ReadyGraph {
    pub graph: TaskGraph,
    /// Total of every listener's dispatch.
    pub dispatched: DispatchSummary,
}

pub struct Build {
    tree: ProjectTree,
    /// Base package used by `mkdirs`.
    pub base_package: Option<String>,
    after_evaluate: Vec<(ProjectId, AfterEvaluate)>,
    listeners: Vec<Rc<dyn TaskGraphListener>>,
    invocations: u64,
}

impl Build {
    /// A build holding only its root project.
    pub fn new(root_name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            tree: ProjectTree::new(root_name, root_dir),
            base_package: None,
            after_evaluate: Vec::new(),
            listeners: Vec::new(),
            invocations: 0,
        }
    }

    /// Create the project tree a build description declares. No plugins
    /// are applied; that is the convention engines' job.
    pub fn from_config(config: &Config, root_dir: &Path, default_root_name: &str) -> Result<Self> {
        let root_name = config.root_project.as_deref().unwrap_or(default_root_name);
        let mut build = Self::new(root_name, root_dir);
        build.base_package = config.base_package.clone();

        for path in config.project_paths() {
            let id = build.tree.add_path(&path)?;
            if let Some(declared) = config.project(&path) {
                let project = build.tree.get_mut(id);
                project.declared_source_sets = declared.source_sets.clone();
                project.project_dependencies = declared.depends_on.clone();
            }
        }

        if let Some(repositories) = &config.repositories {
            let repositories: Vec<Repository> = repositories
                .iter()
                .map(|repo| Repository::new(&repo.name, &repo.url))
                .collect();
            for id in build.tree.ids() {
                build.tree.get_mut(id).repositories = repositories.clone();
            }
        }

        Ok(build)
    }

    pub fn tree(&self) -> &ProjectTree {
        &self.tree
    }

    pub fn project(&self, id: ProjectId) -> &Project {
        self.tree.get(id)
    }

    pub fn project_mut(&mut self, id: ProjectId) -> &mut Project {
        self.tree.get_mut(id)
    }

    pub fn root_dir(&self) -> &Path {
        self.tree.root().dir()
    }

    /// Apply a plugin by id to a project.
    pub fn apply_plugin(&mut self, id: ProjectId, plugin: &str) -> Result<()> {
        plugins::apply(self.tree.get_mut(id), plugin)
    }

    /// Queue `hook` to run for `id` once all projects are configured.
    pub fn after_evaluate<F>(&mut self, id: ProjectId, hook: F)
    where
        F: FnOnce(&mut Build, ProjectId) -> Result<()> + 'static,
    {
        self.after_evaluate.push((id, Box::new(hook)));
    }

    /// Run queued after-evaluate hooks in registration order. Hooks queued
    /// while running are run in the same pass.
    pub fn evaluate(&mut self) -> Result<()> {
        while !self.after_evaluate.is_empty() {
            let pending = std::mem::take(&mut self.after_evaluate);
            for (id, hook) in pending {
                hook(self, id)?;
            }
        }
        Ok(())
    }

    /// Register a listener for task graph finalization. The same listener
    /// registered twice is notified once.
    pub fn when_task_graph_ready(&mut self, listener: Rc<dyn TaskGraphListener>) {
        let already = self
            .listeners
            .iter()
            .any(|existing| std::ptr::addr_eq(Rc::as_ptr(existing), Rc::as_ptr(&listener)));
        if already {
            debug!("task graph listener already registered");
            return;
        }
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Select the requested tasks and their dependencies, then notify every
    /// listener. Each call is a new invocation.
    ///
    /// Listeners always see tasks as evaluation left them: whatever a
    /// previous invocation's listeners configured is rolled back first.
    pub fn finalize_graph(&mut self, requests: &[String]) -> Result<ReadyGraph> {
        for task in self.tree.all_tasks_mut() {
            task.restore_baseline();
        }
        self.evaluate()?;
        for task in self.tree.all_tasks_mut() {
            task.record_baseline();
        }

        self.invocations += 1;
        let graph = graph::resolve(&self.tree, requests, self.invocations)?;
        info!(invocation = graph.invocation(), tasks = graph.len(), "task graph ready");

        let mut dispatched = DispatchSummary::default();
        let listeners = self.listeners.clone();
        for listener in listeners {
            let tasks = tasks_in_order(&mut self.tree, &graph);
            let summary = listener.graph_ready(&graph, tasks)?;
            dispatched.tasks += summary.tasks;
            dispatched.applied += summary.applied;
        }

        Ok(ReadyGraph { graph, dispatched })
    }

    /// Find a task anywhere in the build by its full path, e.g. `":core:jar"`.
    pub fn task(&self, path: &str) -> Option<&Task> {
        self.tree.iter().flat_map(|p| p.tasks()).find(|t| t.path() == path)
    }

    /// Execute a finalized graph in order. The first failure stops the run.
    pub fn execute(&self, graph: &TaskGraph) -> Result<Vec<TaskOutcome>> {
        self.execute_with(graph, |_| Ok(()))
    }

    /// Like [`Build::execute`], handing each outcome to `on_outcome` as
    /// soon as its task finished, before the next task starts.
    ///
    /// # Returns
    ///
    /// * `Ok(outcomes)` - Every task ran, in graph order
    /// * `Err(ConveyorError::TaskFailure)` - A graph path has no task in this build
    /// * `Err(_)` - The failing task's error, or whatever `on_outcome` returned
    pub fn execute_with<F>(&self, graph: &TaskGraph, mut on_outcome: F) -> Result<Vec<TaskOutcome>>
    where
        F: FnMut(&TaskOutcome) -> Result<()>,
    {
        let mut outcomes = Vec::with_capacity(graph.len());
        for path in graph.order() {
            let task = self.task(path).ok_or_else(|| {
                ConveyorError::TaskFailure(format!("task '{}' is in the graph but not in the build", path))
            })?;
            let project = self.tree.get(task.project());
            let outcome = executor::execute(&self.tree, project, task, self.base_package.as_deref())?;
            on_outcome(&outcome)?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

/// Mutable references to the graph's tasks, in graph order.
fn tasks_in_order<'a>(tree: &'a mut ProjectTree, graph: &TaskGraph) -> Vec<&'a mut Task> {
    let position: HashMap<&str, usize> = graph
        .order()
        .iter()
        .enumerate()
        .map(|(i, path)| (path.as_str(), i))
        .collect();

    let mut tasks: Vec<(usize, &mut Task)> = tree
        .all_tasks_mut()
        .filter_map(|task| position.get(task.path()).map(|&i| (i, task)))
        .collect();
    tasks.sort_by_key(|(i, _)| *i);
    tasks.into_iter().map(|(_, task)| task).collect()
}

impl std::fmt::Debug for Build {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Build")
            .field("tree", &self.tree)
            .field("base_package", &self.base_package)
            .field("after_evaluate", &self.after_evaluate.len())
            .field("listeners", &self.listeners.len())
            .field("invocations", &self.invocations)
            .finish()
    }
}
