//! Implementation of the `conveyor run` command.

use crate::build::{Build, TaskGraph};
use crate::cli::TasksArgs;
use crate::context::{BuildContext, resolve_context};
use crate::error::Result;
use crate::events::{Event, append_event};
use std::path::Path;
use tracing::info;

use super::load_build;
use super::plan::configure;

/// Configure the requested tasks, then execute them in graph order.
///
/// The run stops at the first failure. Every task that finished before it
/// is already printed and has its `execute` event in the log.
pub fn cmd_run(dir: Option<&Path>, args: TasksArgs) -> Result<()> {
    let ctx = resolve_context(dir)?;
    let mut build = load_build(&ctx)?;
    let ready = configure(&ctx, &mut build, &args.tasks)?;

    let executed = execute_logged(&ctx, &build, &ready.graph)?;

    info!(tasks = executed, "run complete");
    println!();
    println!("BUILD SUCCESSFUL ({} tasks)", executed);
    Ok(())
}

/// Execute `graph`, printing and logging each task as it finishes.
///
/// # Returns
///
/// The number of tasks executed.
pub(super) fn execute_logged(ctx: &BuildContext, build: &Build, graph: &TaskGraph) -> Result<usize> {
    let outcomes = build.execute_with(graph, |outcome| {
        println!("> {}", outcome.path);
        for effect in &outcome.effects {
            println!("    {}", effect);
        }
        append_event(ctx, &Event::executed(outcome))
    })?;
    Ok(outcomes.len())
}
