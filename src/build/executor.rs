//! Task execution.
//!
//! Metadata tasks touch the filesystem. Process tasks stop at rendering the
//! command line the host would launch; running a JVM is not part of this
//! host.

use crate::error::{ConveyorError, Result};
use crate::ide::{write_classpath, write_jdt_prefs, write_project_file};
use crate::project::{Project, ProjectTree};
use crate::task::{Task, TaskContext, TaskWork};
use std::path::PathBuf;
use tracing::{debug, info};

/// What executing one task did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub path: String,
    /// One line per observable effect.
    pub effects: Vec<String>,
}

/// Run a task's work, then its finalizers in registration order.
pub(super) fn execute(
    tree: &ProjectTree,
    project: &Project,
    task: &Task,
    base_package: Option<&str>,
) -> Result<TaskOutcome> {
    debug!(task = task.path(), "executing task");

    let effects = run_work(tree, project, task, base_package).map_err(|e| task_failure(task, e))?;

    let context = TaskContext {
        task_path: task.path(),
        project_path: project.path(),
        project_dir: project.dir(),
    };
    for finalizer in task.finalizers() {
        finalizer(&context).map_err(|e| task_failure(task, e))?;
    }

    Ok(TaskOutcome {
        path: task.path().to_string(),
        effects,
    })
}

fn task_failure(task: &Task, err: ConveyorError) -> ConveyorError {
    match err {
        ConveyorError::IoFailure(_) | ConveyorError::DescriptorError(_) | ConveyorError::TaskFailure(_) => err,
        other => ConveyorError::TaskFailure(format!("{}: {}", task.path(), other)),
    }
}

fn run_work(tree: &ProjectTree, project: &Project, task: &Task, base_package: Option<&str>) -> Result<Vec<String>> {
    match task.work() {
        TaskWork::Lifecycle => Ok(Vec::new()),
        TaskWork::Compile { .. } | TaskWork::Test | TaskWork::Exec | TaskWork::Archive => {
            Ok(vec![command_line(project, task)?])
        }
        TaskWork::Delete { targets } => delete(project, targets),
        TaskWork::GenerateJdtPrefs => {
            write_jdt_prefs(project)?;
            Ok(vec![format!("wrote {}", crate::ide::JDT_PREFS_FILE)])
        }
        TaskWork::GenerateProjectFile => {
            let model = eclipse_model(project, task)?;
            write_project_file(project, model)?;
            Ok(vec![format!("wrote {}", crate::ide::PROJECT_FILE)])
        }
        TaskWork::GenerateClasspath => {
            let model = eclipse_model(project, task)?;
            write_classpath(project, tree, model)?;
            Ok(vec![format!("wrote {}", crate::ide::CLASSPATH_FILE)])
        }
        TaskWork::MkDirs => mkdirs(project, base_package),
    }
}

fn eclipse_model<'a>(project: &'a Project, task: &Task) -> Result<&'a crate::ide::EclipseModel> {
    project.eclipse.as_ref().ok_or_else(|| {
        ConveyorError::TaskFailure(format!(
            "{}: project '{}' has no eclipse model",
            task.path(),
            project.path()
        ))
    })
}

fn delete(project: &Project, targets: &[PathBuf]) -> Result<Vec<String>> {
    let mut effects = Vec::new();
    for target in targets {
        let path = project.dir().join(target);
        if !path.exists() {
            continue;
        }
        std::fs::remove_file(&path).map_err(|e| ConveyorError::io("delete", &path, e))?;
        effects.push(format!("deleted {}", target.display()));
    }
    Ok(effects)
}

/// Directories `mkdirs` creates: every source directory, or below each of
/// them the base package followed by the project path.
pub fn mkdirs_targets(project: &Project, base_package: Option<&str>) -> Vec<PathBuf> {
    let package_dir = base_package.map(|package| {
        let mut dir: PathBuf = package.split('.').collect();
        for segment in project.path().split(':').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir
    });

    project
        .source_dirs()
        .into_iter()
        .map(|src| match &package_dir {
            Some(package_dir) => src.join(package_dir),
            None => src,
        })
        .collect()
}

fn mkdirs(project: &Project, base_package: Option<&str>) -> Result<Vec<String>> {
    let mut effects = Vec::new();
    for dir in mkdirs_targets(project, base_package) {
        if dir.is_dir() {
            continue;
        }
        std::fs::create_dir_all(&dir).map_err(|e| ConveyorError::io("create directory", &dir, e))?;
        info!("\tmkdir {}", dir.display());
        effects.push(format!("mkdir {}", dir.display()));
    }
    Ok(effects)
}

/// The command line the host would launch for a process task.
pub fn command_line(project: &Project, task: &Task) -> Result<String> {
    let options = task.options();
    let mut argv: Vec<String> = Vec::new();

    match task.work() {
        TaskWork::Compile { source_set } => {
            argv.push("javac".to_string());
            if let Some(compile) = &options.compile {
                if let Some(encoding) = &compile.encoding {
                    argv.push("-encoding".to_string());
                    argv.push(encoding.clone());
                }
                if !compile.warnings {
                    argv.push("-nowarn".to_string());
                }
                argv.extend(compile.compiler_args.iter().cloned());
            }
            argv.push("-d".to_string());
            argv.push(format!("build/classes/java/{}", source_set));
            if let Some(set) = project.source_set(source_set) {
                argv.extend(set.java_dirs.iter().map(|d| d.to_string_lossy().into_owned()));
            }
        }
        TaskWork::Test | TaskWork::Exec => {
            argv.push("java".to_string());
            if let Some(fork) = &options.fork {
                if fork.enable_assertions {
                    argv.push("-ea".to_string());
                }
                argv.extend(fork.jvm_args.iter().cloned());
            }
            if matches!(task.work(), TaskWork::Exec) {
                if let Some(application) = &project.application {
                    argv.extend(application.default_jvm_args.iter().cloned());
                }
                let main_class = options
                    .fork
                    .as_ref()
                    .and_then(|fork| fork.main_class.clone())
                    .or_else(|| project.application.as_ref().and_then(|a| a.main_class.clone()))
                    .ok_or_else(|| {
                        ConveyorError::TaskFailure(format!("{}: no main class configured", task.path()))
                    })?;
                argv.push(main_class);
            } else {
                let uses_platform = options.test.as_ref().is_some_and(|t| t.use_junit_platform);
                let launcher = if uses_platform {
                    "org.junit.platform.console.ConsoleLauncher"
                } else {
                    "org.junit.runner.JUnitCore"
                };
                argv.push(launcher.to_string());
            }
        }
        TaskWork::Archive => {
            argv.push("jar".to_string());
            argv.push("--create".to_string());
            if let Some(archive) = &options.archive {
                argv.push(format!("--file=build/libs/{}", archive.archive_name));
                if archive.merge_service_files {
                    argv.push("--merge-service-files".to_string());
                }
            }
            argv.push("-C".to_string());
            argv.push("build/classes/java/main".to_string());
            argv.push(".".to_string());
        }
        other => {
            return Err(ConveyorError::TaskFailure(format!(
                "{}: {:?} does not launch a process",
                task.path(),
                other
            )));
        }
    }

    Ok(shell_words::join(&argv))
}
