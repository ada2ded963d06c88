//! Command implementations for conveyor.
//!
//! Each command is implemented in its own module. The dispatch function
//! routes CLI commands to their implementations.

mod init;
mod plan;
mod projects;
mod run;


use crate::build::Build;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::BuildContext;
use crate::conventions::apply_conventions;
use crate::error::Result;
use std::rc::Rc;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let dir = cli.directory.as_deref();
    match cli.command {
        Command::Init(args) => init::cmd_init(dir, args),
        Command::Projects => projects::cmd_projects(dir),
        Command::Plan(args) => plan::cmd_plan(dir, args),
        Command::Run(args) => run::cmd_run(dir, args),
    }
}

/// Load the build description and configure every project by convention.
pub(crate) fn load_build(ctx: &BuildContext) -> Result<Build> {
    let config = Rc::new(Config::load(ctx.config_path())?);
    let mut build = Build::from_config(&config, &ctx.build_root, &ctx.root_dir_name())?;
    apply_conventions(&mut build, &config)?;
    Ok(build)
}
