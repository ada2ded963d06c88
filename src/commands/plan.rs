//! Implementation of the `conveyor plan` command.
//!
//! Finalizes the task graph for the requested tasks, which dispatches all
//! deferred task configuration, then prints each task as it would run.

use crate::build::{Build, ReadyGraph, command_line};
use crate::cli::TasksArgs;
use crate::context::{BuildContext, resolve_context};
use crate::error::Result;
use crate::events::{Event, append_event};
use crate::task::TaskWork;
use std::path::Path;

use super::load_build;

pub fn cmd_plan(dir: Option<&Path>, args: TasksArgs) -> Result<()> {
    let ctx = resolve_context(dir)?;
    let mut build = load_build(&ctx)?;
    let ready = configure(&ctx, &mut build, &args.tasks)?;

    println!(
        "Task graph ({} tasks, {} configuration actions applied)",
        ready.graph.len(),
        ready.dispatched.applied
    );
    println!();

    for path in ready.graph.order() {
        let Some(task) = build.task(path) else {
            continue;
        };
        println!("{} [{}]", path, task.task_type().name());
        match task.work() {
            TaskWork::Compile { .. } | TaskWork::Test | TaskWork::Exec | TaskWork::Archive => {
                let project = build.project(task.project());
                println!("    {}", command_line(project, task)?);
            }
            _ => {}
        }
        if !task.dependencies().is_empty() {
            println!("    depends on: {}", task.dependencies().join(", "));
        }
        if !task.finalizers().is_empty() {
            println!("    finalizers: {}", task.finalizers().len());
        }
    }
    Ok(())
}

/// Finalize the graph for `tasks` and record the dispatch.
pub(super) fn configure(ctx: &BuildContext, build: &mut Build, tasks: &[String]) -> Result<ReadyGraph> {
    let ready = build.finalize_graph(tasks)?;

    append_event(ctx, &Event::configured(tasks, &ready))?;

    Ok(ready)
}
