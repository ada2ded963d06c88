//! Build event log for conveyor.
//!
//! Every `init`, every finalized task graph and every executed task leaves
//! one JSON line in `.conveyor/events.ndjson` below the build root:
//!
//! ```text
//! {"ts":"...","action":"configure","actor":"ana@ci-3","details":{"invocation":1,...}}
//! {"ts":"...","action":"execute","actor":"ana@ci-3","task":":core:eclipse","details":{"effects":[...]}}
//! ```
//!
//! The log is append-only; conveyor never rewrites earlier lines.

use crate::build::{ReadyGraph, TaskOutcome};
use crate::context::BuildContext;
use crate::error::{ConveyorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// `conveyor.yaml` written
    Init,
    /// Task graph finalized and configuration dispatched
    Configure,
    /// One task executed successfully
    Execute,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventAction::Init => "init",
            EventAction::Configure => "configure",
            EventAction::Execute => "execute",
        };
        f.write_str(name)
    }
}

/// One line of the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    /// `user@host` of whoever ran the build.
    pub actor: String,
    /// Task path, for `execute` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default)]
    pub details: Value,
}

impl Event {
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor(),
            task: None,
            details: json!({}),
        }
    }

    /// The `configure` event for a finalized graph.
    pub fn configured(requested: &[String], ready: &ReadyGraph) -> Self {
        Self::new(EventAction::Configure).with_details(json!({
            "requested": requested,
            "invocation": ready.graph.invocation(),
            "tasks": ready.graph.order(),
            "configured_tasks": ready.dispatched.tasks,
            "applied_actions": ready.dispatched.applied,
        }))
    }

    /// The `execute` event for one finished task.
    pub fn executed(outcome: &TaskOutcome) -> Self {
        Self::new(EventAction::Execute)
            .with_task(&outcome.path)
            .with_details(json!({ "effects": outcome.effects }))
    }

    pub fn with_task(mut self, task_path: impl Into<String>) -> Self {
        self.task = Some(task_path.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

fn actor() -> String {
    let user = ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .unwrap_or_else(|| "unknown".to_string());
    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());
    format!("{}@{}", user, host)
}

/// Append `event` as one line, creating `.conveyor/` on first use.
pub fn append_event(ctx: &BuildContext, event: &Event) -> Result<()> {
    let path = ctx.events_file();
    let mut line = serde_json::to_string(event)
        .map_err(|e| ConveyorError::io("serialize event for", &path, e))?;
    line.push('\n');

    fs::create_dir_all(&ctx.state_dir)
        .map_err(|e| ConveyorError::io("create state directory", &ctx.state_dir, e))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| ConveyorError::io("open", &path, e))?;
    file.write_all(line.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| ConveyorError::io("append to", &path, e))
}

/// Every event logged so far, oldest first. A build without a log has no
/// events.
pub fn read_events(ctx: &BuildContext) -> Result<Vec<Event>> {
    let path = ctx.events_file();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path).map_err(|e| ConveyorError::io("read", &path, e))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| ConveyorError::io("parse", &path, format!("line {}: {}", n + 1, e)))
        })
        .collect()
}
