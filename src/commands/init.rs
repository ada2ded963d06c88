//! Implementation of the `conveyor init` command.
//!
//! Writes a default `conveyor.yaml` naming the root project. Running it
//! again on an initialized build changes nothing.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::context::BuildContext;
use crate::error::{ConveyorError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::fs::atomic_write_file;
use serde_json::json;
use std::env;
use std::path::Path;

pub fn cmd_init(dir: Option<&Path>, args: InitArgs) -> Result<()> {
    let root = match dir {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().map_err(|e| {
            ConveyorError::UserError(format!("failed to get current working directory: {}", e))
        })?,
    };
    let ctx = BuildContext::at(&root);
    let config_path = ctx.config_path();

    if config_path.exists() {
        // Still parse it, so a broken description is reported now.
        Config::load(&config_path)?;
        println!("Build already initialized at {}", ctx.build_root.display());
        return Ok(());
    }

    let config = Config {
        root_project: Some(args.name.unwrap_or_else(|| ctx.root_dir_name())),
        ..Config::default()
    };
    config.validate()?;
    atomic_write_file(&config_path, &config.to_yaml()?)?;

    let event = Event::new(EventAction::Init).with_details(json!({
        "root_project": config.root_project,
        "config": config_path.display().to_string(),
    }));
    append_event(&ctx, &event)?;

    println!("Initialized build at {}", ctx.build_root.display());
    println!("  Root project: {}", config.root_project.as_deref().unwrap_or_default());
    println!();
    println!("Declare projects under `projects:` in {}.", config_path.display());
    Ok(())
}
