//! The `mkdirs` task: creates missing source directories.

use crate::build::Build;
use crate::error::Result;
use crate::project::ProjectId;
use crate::task::{Task, TaskWork, types};
use tracing::debug;

pub const MKDIRS_TASK: &str = "mkdirs";

/// Tasks that read source directories and must run after `mkdirs`.
const RUNS_BEFORE: &[&str] = &["eclipseClasspath", "idea"];

/// Add the task to a project and order it before IDE metadata generation.
pub fn install(build: &mut Build, id: ProjectId, task_name: &str) -> Result<()> {
    let project = build.project_mut(id);
    let project_path = project.path().to_string();
    let task = project.add_task(Task::new(id, &project_path, task_name, &types::MKDIRS, TaskWork::MkDirs))?;
    task.group = Some("IDE".to_string());
    task.description = Some("Creates missing source directories".to_string());

    let task_name = task_name.to_string();
    build.after_evaluate(id, move |build, id| {
        let project = build.project_mut(id);
        for dependent in RUNS_BEFORE {
            match project.task_mut(dependent) {
                Some(task) => task.depends_on(task_name.as_str()),
                None => debug!(project = project.path(), task = dependent, "no task to order after mkdirs"),
            }
        }
        Ok(())
    });
    Ok(())
}
