//! Implementation of the `conveyor projects` command.

use crate::config::Config;
use crate::context::resolve_context;
use crate::error::Result;
use crate::project::ProjectId;
use std::path::Path;

use super::load_build;

/// List every project with its kind, group and Eclipse project name.
pub fn cmd_projects(dir: Option<&Path>) -> Result<()> {
    let ctx = resolve_context(dir)?;
    let config = Config::load(ctx.config_path())?;
    let build = load_build(&ctx)?;

    println!("Projects");
    println!("========");
    println!();
    println!("  {:<28} {:<12} {:<24} ECLIPSE", "PATH", "KIND", "GROUP");

    for project in build.tree().iter() {
        let kind = if project.id() == ProjectId::ROOT {
            "root".to_string()
        } else {
            config.kind_of(project.path()).to_string()
        };
        let eclipse = project
            .eclipse
            .as_ref()
            .map(|model| model.project_name.as_str())
            .unwrap_or("-");
        println!(
            "  {:<28} {:<12} {:<24} {}",
            project.path(),
            kind,
            project.group,
            eclipse
        );
    }
    Ok(())
}
