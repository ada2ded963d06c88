//! Java project conventions: layout, IDE metadata, packaging.

use super::mkdirs::{self, MKDIRS_TASK};
use crate::build::plugins::{APPLICATION, ECLIPSE, JAVA, JAVA_LIBRARY, SHADOW};
use crate::config::Config;
use crate::descriptor::install_output_patch;
use crate::engine::ConventionEngine;
use crate::error::ConveyorError;
use std::path::PathBuf;
use std::rc::Rc;

/// Tasks that regenerate Eclipse metadata. Each one runs after
/// `cleanEclipse`, otherwise a regenerated `.classpath` keeps the previous
/// generation's entries next to the new ones.
pub const REGENERATING_TASKS: &[&str] = &["eclipse", "eclipseProject", "eclipseJdt", "eclipseClasspath"];

/// Layout and IDE conventions shared by every Java project. `output_dir`
/// replaces Eclipse's `bin` as output root.
pub fn java_base(output_dir: impl Into<String>) -> impl FnOnce(&mut ConventionEngine) {
    let output_dir = output_dir.into();
    move |engine| {
        engine.register_project_action(move |build, id| {
            build.apply_plugin(id, JAVA)?;
            build.apply_plugin(id, ECLIPSE)?;

            let project = build.project_mut(id);

            // Sources and resources share one directory per source set.
            for set in &mut project.source_sets {
                let dir = PathBuf::from("src").join(&set.name);
                set.java_dirs = vec![dir.clone()];
                set.resource_dirs = vec![dir];
            }

            let project_name = format!("{}:{}", project.group, project.name());
            let project_path = project.path().to_string();
            let eclipse = project.eclipse.as_mut().ok_or_else(|| {
                ConveyorError::ConfigurationFailure(format!(
                    "project '{}' has no eclipse model",
                    project_path
                ))
            })?;
            eclipse.project_name = project_name;
            eclipse.default_output_dir = PathBuf::from(&output_dir).join("base");
            // Setting the default output alone leaves every source folder
            // on `bin/<set>`.
            install_output_patch(&mut eclipse.classpath, "bin/", format!("{}/", output_dir));

            for name in REGENERATING_TASKS {
                if let Some(task) = project.task_mut(name) {
                    task.depends_on("cleanEclipse");
                }
            }

            mkdirs::install(build, id, MKDIRS_TASK)
        });
    }
}

pub fn library(engine: &mut ConventionEngine) {
    engine.register_project_action(|build, id| build.apply_plugin(id, JAVA_LIBRARY));
}

/// Runnable applications packaged as a fat jar. Main class and JVM
/// arguments come from the project's entry in the build description.
pub fn application(config: Rc<Config>) -> impl FnOnce(&mut ConventionEngine) {
    move |engine| {
        engine.register_project_action(move |build, id| {
            build.apply_plugin(id, APPLICATION)?;
            build.apply_plugin(id, SHADOW)?;

            let project = build.project_mut(id);
            let Some(declared) = config.project(project.path()) else {
                return Ok(());
            };
            let jvm_args = declared.split_jvm_args()?;
            let main_class = declared.main_class.clone();
            if let Some(application) = project.application.as_mut() {
                application.main_class = main_class;
                application.default_jvm_args.extend(jvm_args);
            }
            Ok(())
        });

        engine.register_by_name("shadowJar", |shadow_jar| shadow_jar.merge_service_files());
    }
}
