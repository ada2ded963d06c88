//! Organization conventions built on the convention engine.
//!
//! The root project gets the build-wide JVM conventions; every other
//! project gets the engine matching its kind. Engines are shared between
//! projects of the same kind.

mod jdt_problems;
pub mod java;
pub mod jvm;
pub mod mkdirs;


pub use jdt_problems::COMPILER_PROBLEMS;

use crate::build::Build;
use crate::config::{Config, ProjectKind};
use crate::engine::ConventionEngine;
use crate::error::Result;
use crate::project::ProjectId;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::info;

pub fn root_engine() -> ConventionEngine {
    ConventionEngine::new("root").with(jvm::root)
}

/// Engine for a project of `kind`.
pub fn engine_for(kind: ProjectKind, config: &Rc<Config>) -> ConventionEngine {
    match kind {
        ProjectKind::Library => ConventionEngine::new("java-library")
            .with(java::java_base(config.eclipse_output_dir.clone()))
            .with(java::library),
        ProjectKind::Application => ConventionEngine::new("java-application")
            .with(java::java_base(config.eclipse_output_dir.clone()))
            .with(java::application(Rc::clone(config))),
        ProjectKind::None => ConventionEngine::new("base"),
    }
}

/// Apply the root engine to the root project, then each subproject's
/// engine, parents before children.
pub fn apply_conventions(build: &mut Build, config: &Rc<Config>) -> Result<()> {
    Rc::new(root_engine()).apply(build, ProjectId::ROOT)?;

    let mut engines: HashMap<ProjectKind, Rc<ConventionEngine>> = HashMap::new();
    for id in build.tree().subprojects(ProjectId::ROOT) {
        let kind = config.kind_of(build.project(id).path());
        let engine = engines
            .entry(kind)
            .or_insert_with(|| Rc::new(engine_for(kind, config)));
        engine.apply(build, id)?;
    }

    info!(projects = build.tree().iter().count(), "conventions applied");
    Ok(())
}
