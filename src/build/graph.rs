//! Task graph selection and ordering.

use crate::error::{ConveyorError, Result};
use crate::project::{ProjectId, ProjectTree};
use crate::registry::DispatchSummary;
use crate::task::{Task, task_path};
use std::collections::HashMap;

/// The tasks of one build invocation, dependencies before dependents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGraph {
    invocation: u64,
    order: Vec<String>,
}

impl TaskGraph {
    /// Identifies the build invocation this graph was finalized for.
    pub fn invocation(&self) -> u64 {
        self.invocation
    }

    /// Task paths in execution order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Number of selected tasks.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the task at `path` was selected.
    ///
    /// # Returns
    ///
    /// * `true` - The task runs in this invocation
    /// * `false` - It was neither requested nor a dependency of a requested task
    pub fn contains(&self, path: &str) -> bool {
        self.order.iter().any(|p| p == path)
    }
}

/// Notified once the graph of an invocation is final, before anything runs.
pub trait TaskGraphListener {
    /// `tasks` are the graph's tasks in execution order.
    fn graph_ready(&self, graph: &TaskGraph, tasks: Vec<&mut Task>) -> Result<DispatchSummary>;
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Select the tasks named by `requests` plus everything they depend on.
///
/// A request starting with `:` is an exact task path; anything else is a
/// task name matched in every project.
pub fn resolve(tree: &ProjectTree, requests: &[String], invocation: u64) -> Result<TaskGraph> {
    let index: HashMap<String, (ProjectId, String)> = tree
        .iter()
        .flat_map(|project| {
            project
                .tasks()
                .map(move |task| (task.path().to_string(), (project.id(), task.name().to_string())))
        })
        .collect();

    let mut roots = Vec::new();
    for request in requests {
        if request.starts_with(':') {
            if !index.contains_key(request) {
                return Err(ConveyorError::UserError(format!("task '{}' not found", request)));
            }
            roots.push(request.clone());
        } else {
            let before = roots.len();
            for project in tree.iter() {
                if let Some(task) = project.task(request) {
                    roots.push(task.path().to_string());
                }
            }
            if roots.len() == before {
                return Err(ConveyorError::UserError(format!(
                    "task '{}' not found in any project",
                    request
                )));
            }
        }
    }

    let mut marks: HashMap<String, Mark> = HashMap::new();
    let mut order = Vec::new();
    let mut trail = Vec::new();
    for root in roots {
        visit(tree, &index, &root, &mut marks, &mut trail, &mut order)?;
    }

    Ok(TaskGraph { invocation, order })
}

fn visit(
    tree: &ProjectTree,
    index: &HashMap<String, (ProjectId, String)>,
    path: &str,
    marks: &mut HashMap<String, Mark>,
    trail: &mut Vec<String>,
    order: &mut Vec<String>,
) -> Result<()> {
    match marks.get(path) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = trail.iter().position(|p| p == path).unwrap_or(0);
            let mut cycle = trail[start..].to_vec();
            cycle.push(path.to_string());
            return Err(ConveyorError::UserError(format!(
                "task dependency cycle: {}",
                cycle.join(" -> ")
            )));
        }
        None => {}
    }

    let Some((project_id, name)) = index.get(path) else {
        return Err(ConveyorError::UserError(format!("task '{}' not found", path)));
    };
    let project = tree.get(*project_id);
    let Some(task) = project.task(name) else {
        return Err(ConveyorError::UserError(format!("task '{}' not found", path)));
    };

    marks.insert(path.to_string(), Mark::Visiting);
    trail.push(path.to_string());

    for dependency in task.dependencies() {
        let dependency_path = if dependency.starts_with(':') {
            dependency.clone()
        } else {
            task_path(project.path(), dependency)
        };
        if !index.contains_key(&dependency_path) {
            return Err(ConveyorError::UserError(format!(
                "task '{}' depends on unknown task '{}'",
                path, dependency_path
            )));
        }
        visit(tree, index, &dependency_path, marks, trail, order)?;
    }

    trail.pop();
    marks.insert(path.to_string(), Mark::Done);
    order.push(path.to_string());
    Ok(())
}
