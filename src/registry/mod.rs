//! Deferred task configurator registry.
//!
//! Configuration is recorded up front and applied once the host's task
//! graph is final, so every action sees stable task names and types.
//! Two kinds of registration exist:
//!
//! - by type: runs on every task whose type is the registered type or a
//!   subtype of it
//! - by name: runs on every task whose name equals the registered name
//!
//! [`ConfiguratorRegistry::dispatch`] visits tasks in graph order. For each
//! task it runs all matching by-type registrations, then all matching
//! by-name registrations, each pass in registration order. Matching is not
//! exclusive and nothing is deduplicated.


use crate::error::{ConveyorError, Result};
use crate::task::{Task, TaskType};
use std::fmt;
use tracing::{debug, info};

/// A configuration action applied to a matched task.
pub type TaskAction = Box<dyn Fn(&mut Task) -> Result<()>>;

/// What a registration matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMatcher {
    /// The type or any of its subtypes.
    ByType(&'static TaskType),
    /// This exact task name.
    ByName(String),
}

impl TaskMatcher {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskMatcher::ByType(task_type) => task_type.is_assignable_from(task.task_type()),
            TaskMatcher::ByName(name) => name == task.name(),
        }
    }
}

impl fmt::Display for TaskMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskMatcher::ByType(task_type) => write!(f, "type {}", task_type),
            TaskMatcher::ByName(name) => write!(f, "name '{}'", name),
        }
    }
}

struct Registration {
    matcher: TaskMatcher,
    action: TaskAction,
}

/// Counts reported by a finished dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub tasks: usize,
    pub applied: usize,
}

/// Registry of pending task configuration.
#[derive(Default)]
pub struct ConfiguratorRegistry {
    by_type: Vec<Registration>,
    by_name: Vec<Registration>,
}

impl ConfiguratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` on every task of `task_type` or a subtype.
    pub fn register_by_type<F>(&mut self, task_type: &'static TaskType, action: F)
    where
        F: Fn(&mut Task) -> Result<()> + 'static,
    {
        self.by_type.push(Registration {
            matcher: TaskMatcher::ByType(task_type),
            action: Box::new(action),
        });
    }

    /// Run `action` on every task named exactly `name`.
    pub fn register_by_name<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn(&mut Task) -> Result<()> + 'static,
    {
        self.by_name.push(Registration {
            matcher: TaskMatcher::ByName(name.into()),
            action: Box::new(action),
        });
    }

    /// Number of registrations, by type and by name together.
    pub fn len(&self) -> usize {
        self.by_type.len() + self.by_name.len()
    }

    /// True when nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply every matching registration to every task.
    ///
    /// The first failing action aborts the whole dispatch; its error is
    /// returned as a `ConfigurationFailure` naming the task. Tasks already
    /// configured keep their configuration, the build is expected to stop.
    pub fn dispatch<'a, I>(&self, tasks: I) -> Result<DispatchSummary>
    where
        I: IntoIterator<Item = &'a mut Task>,
    {
        let mut summary = DispatchSummary::default();

        for task in tasks {
            summary.tasks += 1;
            for registration in self.by_type.iter().chain(self.by_name.iter()) {
                if !registration.matcher.matches(task) {
                    continue;
                }
                debug!(task = task.path(), matcher = %registration.matcher, "configuring task");
                (registration.action)(task).map_err(|e| configuration_failure(task, e))?;
                summary.applied += 1;
            }
        }

        info!(tasks = summary.tasks, applied = summary.applied, "task configuration dispatched");
        Ok(summary)
    }
}

fn configuration_failure(task: &Task, err: ConveyorError) -> ConveyorError {
    match err {
        ConveyorError::ConfigurationFailure(_) => err,
        other => ConveyorError::ConfigurationFailure(format!(
            "couldn't configure task '{}': {}",
            task.path(),
            other
        )),
    }
}

impl fmt::Debug for ConfiguratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matchers = |regs: &[Registration]| {
            regs.iter()
                .map(|r| r.matcher.to_string())
                .collect::<Vec<_>>()
        };
        f.debug_struct("ConfiguratorRegistry")
            .field("by_type", &matchers(&self.by_type))
            .field("by_name", &matchers(&self.by_name))
            .finish()
    }
}
