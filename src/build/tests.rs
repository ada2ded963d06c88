use super::*;
use crate::config::Config;
use crate::error::ConveyorError;
use crate::exit_codes;
use crate::task::{Task, TaskWork, types};
use std::cell::{Cell, RefCell};
use tempfile::TempDir;

fn java_build(dir: &Path) -> Build {
    let config = Config::from_yaml(
        r#"
root_project: acme
projects:
  - path: ":core"
  - path: ":app"
    depends_on: [":core"]
"#,
    )
    .unwrap();
    let mut build = Build::from_config(&config, dir, "ignored").unwrap();
    for path in [":core", ":app"] {
        let id = build.tree().find(path).unwrap();
        build.apply_plugin(id, plugins::JAVA).unwrap();
    }
    build
}

fn requests(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Counts notifications and records the graph each one saw.
#[derive(Default)]
struct Recorder {
    calls: Cell<usize>,
    seen: RefCell<Vec<Vec<String>>>,
}

impl TaskGraphListener for Recorder {
    fn graph_ready(&self, _graph: &TaskGraph, tasks: Vec<&mut Task>) -> Result<DispatchSummary> {
        self.calls.set(self.calls.get() + 1);
        self.seen
            .borrow_mut()
            .push(tasks.iter().map(|t| t.path().to_string()).collect());
        Ok(DispatchSummary {
            tasks: tasks.len(),
            applied: 1,
        })
    }
}

// =========================================================================
// Project layout
// =========================================================================

#[test]
fn from_config_creates_declared_and_implied_projects() {
    let dir = TempDir::new().unwrap();
    let config = Config::from_yaml(
        r#"
projects:
  - path: ":services:billing"
    source_sets: [main]
"#,
    )
    .unwrap();
    let build = Build::from_config(&config, dir.path(), "acme").unwrap();

    assert_eq!(build.tree().root().name(), "acme");
    let services = build.tree().find(":services").unwrap();
    let billing = build.tree().find(":services:billing").unwrap();
    assert_eq!(build.project(billing).parent(), Some(services));
    assert_eq!(build.project(billing).declared_source_sets, vec!["main"]);
    assert_eq!(build.project(billing).dir(), dir.path().join("services").join("billing"));
}

#[test]
fn from_config_installs_repository_override_everywhere() {
    let dir = TempDir::new().unwrap();
    let config = Config::from_yaml(
        r#"
repositories:
  - name: Mirror
    url: https://mirror.example.com/maven/
projects:
  - path: ":core"
"#,
    )
    .unwrap();
    let build = Build::from_config(&config, dir.path(), "acme").unwrap();

    for project in build.tree().iter() {
        assert_eq!(project.repositories.len(), 1);
        assert_eq!(project.repositories[0].name, "Mirror");
    }
}

// =========================================================================
// Plugins
// =========================================================================

#[test]
fn java_plugin_creates_standard_tasks() {
    let dir = TempDir::new().unwrap();
    let build = java_build(dir.path());
    let core = build.project(build.tree().find(":core").unwrap());

    let names: Vec<&str> = core.tasks().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec!["compileJava", "compileTestJava", "classes", "jar", "test", "build"]
    );
    assert_eq!(core.task("jar").unwrap().options().archive.as_ref().unwrap().archive_name, "core.jar");
    assert_eq!(core.source_sets.len(), 2);
}

#[test]
fn compile_task_names_follow_source_sets() {
    assert_eq!(plugins::compile_task_name("main"), "compileJava");
    assert_eq!(plugins::compile_task_name("test"), "compileTestJava");
    assert_eq!(plugins::compile_task_name("integration"), "compileIntegrationJava");
}

#[test]
fn eclipse_before_java_still_gets_java_tasks() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    build.apply_plugin(ProjectId::ROOT, plugins::ECLIPSE).unwrap();
    assert!(build.project(ProjectId::ROOT).task("eclipseClasspath").is_none());

    build.apply_plugin(ProjectId::ROOT, plugins::JAVA).unwrap();
    let root = build.project(ProjectId::ROOT);
    assert!(root.task("eclipseClasspath").is_some());
    assert!(root.task("eclipseJdt").is_some());
    assert_eq!(
        root.task("eclipse").unwrap().dependencies(),
        ["eclipseProject", "eclipseJdt", "eclipseClasspath"]
    );
}

#[test]
fn applying_a_plugin_twice_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let core = build.tree().find(":core").unwrap();
    build.apply_plugin(core, plugins::JAVA_LIBRARY).unwrap();
    build.apply_plugin(core, plugins::JAVA_LIBRARY).unwrap();
    assert_eq!(build.project(core).plugins(), ["java", "java-library"]);
}

#[test]
fn unknown_plugin_is_user_error() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    let err = build.apply_plugin(ProjectId::ROOT, "kotlin").unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

// =========================================================================
// Evaluation and graph finalization
// =========================================================================

#[test]
fn after_evaluate_hooks_run_in_order_including_nested() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    build.after_evaluate(ProjectId::ROOT, |build, id| {
        build.project_mut(id).group.push('a');
        build.after_evaluate(id, |build, id| {
            build.project_mut(id).group.push('c');
            Ok(())
        });
        Ok(())
    });
    build.after_evaluate(ProjectId::ROOT, |build, id| {
        build.project_mut(id).group.push('b');
        Ok(())
    });

    build.evaluate().unwrap();
    assert_eq!(build.project(ProjectId::ROOT).group, "abc");

    // Hooks run once.
    build.evaluate().unwrap();
    assert_eq!(build.project(ProjectId::ROOT).group, "abc");
}

#[test]
fn task_name_matches_every_project_dependencies_first() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let ready = build.finalize_graph(&requests(&["classes"])).unwrap();

    assert_eq!(
        ready.graph.order(),
        [":core:compileJava", ":core:classes", ":app:compileJava", ":app:classes"]
    );
}

#[test]
fn task_path_selects_one_project() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let ready = build.finalize_graph(&requests(&[":app:jar"])).unwrap();

    assert_eq!(ready.graph.order(), [":app:compileJava", ":app:classes", ":app:jar"]);
    assert!(!ready.graph.contains(":core:jar"));
}

#[test]
fn unknown_task_is_user_error() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());

    let by_name = build.finalize_graph(&requests(&["deploy"])).unwrap_err();
    assert!(matches!(by_name, ConveyorError::UserError(_)));
    let by_path = build.finalize_graph(&requests(&[":core:deploy"])).unwrap_err();
    assert!(matches!(by_path, ConveyorError::UserError(_)));
}

#[test]
fn dependency_cycle_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    let root = build.project_mut(ProjectId::ROOT);
    let a = root
        .add_task(Task::new(ProjectId::ROOT, ":", "a", &types::TASK, TaskWork::Lifecycle))
        .unwrap();
    a.depends_on("b");
    let b = root
        .add_task(Task::new(ProjectId::ROOT, ":", "b", &types::TASK, TaskWork::Lifecycle))
        .unwrap();
    b.depends_on("a");

    let err = build.finalize_graph(&requests(&["a"])).unwrap_err();
    assert_eq!(err.to_string(), "task dependency cycle: :a -> :b -> :a");
}

#[test]
fn missing_dependency_is_user_error() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    build
        .project_mut(ProjectId::ROOT)
        .add_task(Task::new(ProjectId::ROOT, ":", "a", &types::TASK, TaskWork::Lifecycle))
        .unwrap()
        .depends_on(":nowhere:b");

    let err = build.finalize_graph(&requests(&["a"])).unwrap_err();
    assert!(err.to_string().contains("unknown task ':nowhere:b'"));
}

#[test]
fn listeners_see_graph_tasks_in_order() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let recorder = Rc::new(Recorder::default());
    build.when_task_graph_ready(recorder.clone());

    let ready = build.finalize_graph(&requests(&[":core:classes"])).unwrap();

    assert_eq!(recorder.calls.get(), 1);
    assert_eq!(
        recorder.seen.borrow()[0],
        vec![":core:compileJava".to_string(), ":core:classes".to_string()]
    );
    assert_eq!(ready.dispatched, DispatchSummary { tasks: 2, applied: 1 });
}

#[test]
fn same_listener_registered_twice_is_notified_once() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let recorder = Rc::new(Recorder::default());
    build.when_task_graph_ready(recorder.clone());
    build.when_task_graph_ready(recorder.clone());
    build.when_task_graph_ready(Rc::new(Recorder::default()));

    assert_eq!(build.listener_count(), 2);
    build.finalize_graph(&requests(&["classes"])).unwrap();
    assert_eq!(recorder.calls.get(), 1);
}

#[test]
fn each_finalization_is_a_new_invocation() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let first = build.finalize_graph(&requests(&["classes"])).unwrap();
    let second = build.finalize_graph(&requests(&["classes"])).unwrap();
    assert_eq!(first.graph.invocation(), 1);
    assert_eq!(second.graph.invocation(), 2);
}

// =========================================================================
// Execution
// =========================================================================

#[test]
fn compile_command_line_reflects_options() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let core = build.tree().find(":core").unwrap();
    {
        let compile = build.project_mut(core).require_task_mut("compileJava").unwrap();
        let options = compile.compile_options_mut().unwrap();
        options.encoding = Some("UTF-8".to_string());
        options.warnings = false;
        options.compiler_arg("-parameters");
    }

    let project = build.project(core);
    let line = command_line(project, project.task("compileJava").unwrap()).unwrap();
    assert_eq!(
        line,
        "javac -encoding UTF-8 -nowarn -parameters -d build/classes/java/main src/main/java"
    );
}

#[test]
fn test_command_line_uses_junit_platform_when_enabled() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let core = build.tree().find(":core").unwrap();
    {
        let test = build.project_mut(core).require_task_mut("test").unwrap();
        test.test_options_mut().unwrap().use_junit_platform = true;
        test.fork_options_mut().unwrap().enable_assertions = true;
    }

    let project = build.project(core);
    let line = command_line(project, project.task("test").unwrap()).unwrap();
    assert_eq!(line, "java -ea org.junit.platform.console.ConsoleLauncher");
}

#[test]
fn exec_without_main_class_fails() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());
    let app = build.tree().find(":app").unwrap();
    build.apply_plugin(app, plugins::APPLICATION).unwrap();

    let project = build.project(app);
    let err = command_line(project, project.task("run").unwrap()).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::TASK_FAILURE);
}

#[test]
fn lifecycle_tasks_have_no_command_line() {
    let dir = TempDir::new().unwrap();
    let build = java_build(dir.path());
    let core = build.project(build.tree().find(":core").unwrap());
    assert!(command_line(core, core.task("build").unwrap()).is_err());
}

#[test]
fn execute_runs_work_then_finalizers() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    build.apply_plugin(ProjectId::ROOT, plugins::ECLIPSE).unwrap();
    std::fs::write(dir.path().join(".project"), "stale").unwrap();

    let marker = dir.path().join("finalized");
    let marker_in_action = marker.clone();
    build
        .project_mut(ProjectId::ROOT)
        .require_task_mut("cleanEclipse")
        .unwrap()
        .do_last(move |ctx| {
            assert_eq!(ctx.task_path, ":cleanEclipse");
            std::fs::write(&marker_in_action, ctx.project_path).map_err(|e| ConveyorError::io("write", &marker_in_action, e))
        });

    let ready = build.finalize_graph(&requests(&["cleanEclipse"])).unwrap();
    let outcomes = build.execute(&ready.graph).unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].effects, vec!["deleted .project".to_string()]);
    assert!(!dir.path().join(".project").exists());
    assert_eq!(std::fs::read_to_string(marker).unwrap(), ":");
}

#[test]
fn failing_finalizer_is_task_failure() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    build.apply_plugin(ProjectId::ROOT, plugins::ECLIPSE).unwrap();
    build
        .project_mut(ProjectId::ROOT)
        .require_task_mut("cleanEclipse")
        .unwrap()
        .do_last(|_| Err(ConveyorError::UserError("boom".to_string())));

    let ready = build.finalize_graph(&requests(&["cleanEclipse"])).unwrap();
    let err = build.execute(&ready.graph).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::TASK_FAILURE);
    assert_eq!(err.to_string(), "Task failed: :cleanEclipse: boom");
}

#[test]
fn execute_with_sees_each_outcome_in_order() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());

    let ready = build.finalize_graph(&requests(&["compileJava"])).unwrap();
    let mut seen = Vec::new();
    let outcomes = build
        .execute_with(&ready.graph, |outcome| {
            seen.push(outcome.path.clone());
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, [":core:compileJava", ":app:compileJava"]);
    assert_eq!(outcomes.len(), 2);
}

#[test]
fn callback_error_stops_the_run() {
    let dir = TempDir::new().unwrap();
    let mut build = java_build(dir.path());

    let ready = build.finalize_graph(&requests(&["compileJava"])).unwrap();
    let mut calls = 0;
    let err = build
        .execute_with(&ready.graph, |_| {
            calls += 1;
            Err(ConveyorError::UserError("stop".to_string()))
        })
        .unwrap_err();

    assert_eq!(calls, 1);
    assert_eq!(err.to_string(), "stop");
}

#[test]
fn graph_task_missing_from_build_is_task_failure() {
    let dir = TempDir::new().unwrap();
    let mut build = Build::new("acme", dir.path());
    build.apply_plugin(ProjectId::ROOT, plugins::ECLIPSE).unwrap();
    let ready = build.finalize_graph(&requests(&["cleanEclipse"])).unwrap();

    let other = Build::new("acme", dir.path());
    let err = other.execute(&ready.graph).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::TASK_FAILURE);
    assert!(err.to_string().contains(":cleanEclipse"));
    assert!(err.to_string().contains("not in the build"));
}

#[test]
fn mkdirs_targets_append_package_and_project_path() {
    let dir = TempDir::new().unwrap();
    let build = java_build(dir.path());
    let core = build.project(build.tree().find(":core").unwrap());

    let targets = mkdirs_targets(core, Some("com.acme"));
    assert_eq!(targets.len(), 4);
    assert_eq!(
        targets[0],
        dir.path().join("core/src/main/java/com/acme/core")
    );
    assert_eq!(mkdirs_targets(core, None)[0], dir.path().join("core/src/main/java"));
}
