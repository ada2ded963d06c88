//! Plugins the host build knows how to apply.

use crate::error::{ConveyorError, Result};
use crate::ide::{EclipseModel, generated_files};
use crate::project::{Application, Project, SourceSet};
use crate::task::{Task, TaskWork, types};
use tracing::debug;

pub const JAVA: &str = "java";
pub const JAVA_LIBRARY: &str = "java-library";
pub const APPLICATION: &str = "application";
pub const SHADOW: &str = "com.github.johnrengelman.shadow";
pub const ECLIPSE: &str = "eclipse";

/// Apply `plugin` and whatever it implies. Applying a plugin twice is a no-op.
pub(super) fn apply(project: &mut Project, plugin: &str) -> Result<()> {
    match plugin {
        JAVA | JAVA_LIBRARY | APPLICATION | SHADOW | ECLIPSE => {}
        other => {
            return Err(ConveyorError::UserError(format!(
                "unknown plugin '{}' applied to project '{}'",
                other,
                project.path()
            )));
        }
    }
    if !project.record_plugin(plugin) {
        return Ok(());
    }
    debug!(project = project.path(), plugin, "applying plugin");

    match plugin {
        JAVA => apply_java(project),
        JAVA_LIBRARY => apply(project, JAVA),
        APPLICATION => {
            apply(project, JAVA)?;
            project.application = Some(Application::default());
            let run = project.add_task(new_task(project_ref(project), "run", &types::JAVA_EXEC, TaskWork::Exec))?;
            run.group = Some("application".to_string());
            run.depends_on("classes");
            Ok(())
        }
        SHADOW => {
            apply(project, JAVA)?;
            let archive_name = format!("{}-all.jar", project.name());
            let shadow = project.add_task(new_task(
                project_ref(project),
                "shadowJar",
                &types::SHADOW_JAR,
                TaskWork::Archive,
            ))?;
            shadow.group = Some("shadow".to_string());
            shadow.depends_on("classes");
            shadow.archive_options_mut()?.archive_name = archive_name;
            Ok(())
        }
        ECLIPSE => apply_eclipse(project),
        _ => Ok(()),
    }
}

/// Owning project's id and path, as new tasks need them.
fn project_ref(project: &Project) -> (crate::project::ProjectId, String) {
    (project.id(), project.path().to_string())
}

fn new_task(
    (id, path): (crate::project::ProjectId, String),
    name: &str,
    task_type: &'static types::TaskType,
    work: TaskWork,
) -> Task {
    Task::new(id, &path, name, task_type, work)
}

/// Name of the compile task of a source set: `compileJava`, `compileTestJava`.
pub fn compile_task_name(source_set: &str) -> String {
    if source_set == "main" {
        return "compileJava".to_string();
    }
    let mut chars = source_set.chars();
    match chars.next() {
        Some(first) => format!("compile{}{}Java", first.to_uppercase(), chars.as_str()),
        None => "compileJava".to_string(),
    }
}

fn apply_java(project: &mut Project) -> Result<()> {
    project.source_sets = project
        .declared_source_sets
        .iter()
        .map(|name| SourceSet::standard(name))
        .collect();

    let sets: Vec<String> = project.source_sets.iter().map(|s| s.name.clone()).collect();
    for set in &sets {
        let compile = project.add_task(new_task(
            project_ref(project),
            &compile_task_name(set),
            &types::JAVA_COMPILE,
            TaskWork::Compile {
                source_set: set.clone(),
            },
        ))?;
        if set != "main" && sets.iter().any(|s| s == "main") {
            compile.depends_on("compileJava");
        }
    }

    let classes = project.add_task(new_task(project_ref(project), "classes", &types::TASK, TaskWork::Lifecycle))?;
    if sets.iter().any(|s| s == "main") {
        classes.depends_on("compileJava");
    }

    let jar = project.add_task(new_task(project_ref(project), "jar", &types::JAR, TaskWork::Archive))?;
    jar.depends_on("classes");
    let jar_name = format!("{}.jar", project.name());
    project.require_task_mut("jar")?.archive_options_mut()?.archive_name = jar_name;

    let test = project.add_task(new_task(project_ref(project), "test", &types::TEST, TaskWork::Test))?;
    test.group = Some("verification".to_string());
    test.depends_on("classes");
    if sets.iter().any(|s| s == "test") {
        test.depends_on(compile_task_name("test"));
    }

    let build = project.add_task(new_task(project_ref(project), "build", &types::TASK, TaskWork::Lifecycle))?;
    build.group = Some("build".to_string());
    build.depends_on("jar");
    build.depends_on("test");

    if project.has_plugin(ECLIPSE) {
        add_eclipse_java_tasks(project)?;
    }
    Ok(())
}

fn apply_eclipse(project: &mut Project) -> Result<()> {
    let name = project.name().to_string();
    project.eclipse = Some(EclipseModel::new(name));

    let clean = project.add_task(new_task(
        project_ref(project),
        "cleanEclipse",
        &types::DELETE,
        TaskWork::Delete {
            targets: generated_files(),
        },
    ))?;
    clean.group = Some("IDE".to_string());
    clean.description = Some("Cleans all Eclipse files.".to_string());

    let project_file = project.add_task(new_task(
        project_ref(project),
        "eclipseProject",
        &types::GENERATOR,
        TaskWork::GenerateProjectFile,
    ))?;
    project_file.description = Some("Generates the Eclipse project file.".to_string());

    let eclipse = project.add_task(new_task(project_ref(project), "eclipse", &types::TASK, TaskWork::Lifecycle))?;
    eclipse.group = Some("IDE".to_string());
    eclipse.description = Some("Generates all Eclipse files.".to_string());
    eclipse.depends_on("eclipseProject");

    if project.has_plugin(JAVA) {
        add_eclipse_java_tasks(project)?;
    }
    Ok(())
}

fn add_eclipse_java_tasks(project: &mut Project) -> Result<()> {
    let jdt = project.add_task(new_task(
        project_ref(project),
        "eclipseJdt",
        &types::GENERATOR,
        TaskWork::GenerateJdtPrefs,
    ))?;
    jdt.description = Some("Generates the Eclipse JDT settings file.".to_string());

    let classpath = project.add_task(new_task(
        project_ref(project),
        "eclipseClasspath",
        &types::GENERATOR,
        TaskWork::GenerateClasspath,
    ))?;
    classpath.description = Some("Generates the Eclipse classpath file.".to_string());

    let eclipse = project.require_task_mut("eclipse")?;
    eclipse.depends_on("eclipseJdt");
    eclipse.depends_on("eclipseClasspath");
    Ok(())
}
