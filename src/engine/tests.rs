//! Tests for the convention engine lifecycle.

use super::*;
use crate::config::Config;
use crate::ide::JDT_PREFS_FILE;
use crate::prefs::{PreferenceStore, merge_into};
use crate::task::{TaskWork, types};
use std::cell::RefCell;
use std::path::Path;
use tempfile::TempDir;

static OTHER_TASK: TaskType = TaskType::new("OtherTask", Some(&types::TASK));

fn add_task(build: &mut Build, id: ProjectId, name: &str, task_type: &'static TaskType) {
    let path = build.project(id).path().to_string();
    build
        .project_mut(id)
        .add_task(Task::new(id, &path, name, task_type, TaskWork::Lifecycle))
        .unwrap();
}

fn requests(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn end_to_end_dispatch_merges_once_and_configures_once() {
    let temp_dir = TempDir::new().unwrap();
    let prefs_path = temp_dir.path().join(JDT_PREFS_FILE);
    std::fs::create_dir_all(prefs_path.parent().unwrap()).unwrap();
    std::fs::write(&prefs_path, "eclipse.preferences.version=1\n").unwrap();

    let merges = Rc::new(Cell::new(0));
    let compiles = Rc::new(Cell::new(0));
    let engine = {
        let merges = Rc::clone(&merges);
        let compiles = Rc::clone(&compiles);
        let prefs_path = prefs_path.clone();
        Rc::new(ConventionEngine::new("root").with(move |engine| {
            engine.register_by_name("eclipse", move |_task| {
                merges.set(merges.get() + 1);
                merge_into(&prefs_path, [("k", "v")])
            });
            engine.register_by_type(&types::JAVA_COMPILE, move |_task| {
                compiles.set(compiles.get() + 1);
                Ok(())
            });
        }))
    };

    let mut build = Build::new("acme", temp_dir.path());
    add_task(&mut build, ProjectId::ROOT, "eclipse", &OTHER_TASK);
    add_task(&mut build, ProjectId::ROOT, "compileJava", &types::JAVA_COMPILE);
    engine.apply(&mut build, ProjectId::ROOT).unwrap();

    let ready = build.finalize_graph(&requests(&["eclipse", "compileJava"])).unwrap();

    assert_eq!(merges.get(), 1);
    assert_eq!(compiles.get(), 1);
    assert_eq!(ready.dispatched, DispatchSummary { tasks: 2, applied: 2 });
    let store = PreferenceStore::load(&prefs_path).unwrap();
    assert_eq!(store.get("k"), Some("v"));
    assert_eq!(store.get("eclipse.preferences.version"), Some("1"));
}

#[test]
fn apply_installs_repositories_and_group_before_actions() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let engine = {
        let seen = Rc::clone(&seen);
        Rc::new(ConventionEngine::new("java").with(move |engine| {
            engine.register_project_action(move |build, id| {
                let project = build.project(id);
                seen.borrow_mut()
                    .push((project.group.clone(), project.repositories.len()));
                Ok(())
            });
        }))
    };

    let config = Config::from_yaml("projects:\n  - path: \":services:billing\"\n").unwrap();
    let mut build = Build::from_config(&config, Path::new("/work/acme"), "acme").unwrap();
    let billing = build.tree().find(":services:billing").unwrap();
    engine.apply(&mut build, billing).unwrap();

    assert_eq!(*seen.borrow(), [("acme.services".to_string(), 3)]);
    let repos: Vec<&str> = build
        .project(billing)
        .repositories
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(repos, ["MavenCentral", "BintrayJCenter", "Google"]);
}

#[test]
fn consumer_repositories_are_not_replaced() {
    let engine = Rc::new(ConventionEngine::new("root"));
    let mut build = Build::new("acme", "/work/acme");
    build.project_mut(ProjectId::ROOT).repositories =
        vec![Repository::new("internal", "https://repo.acme.test/")];

    engine.apply(&mut build, ProjectId::ROOT).unwrap();

    let repos = &build.project(ProjectId::ROOT).repositories;
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "internal");
}

#[test]
fn project_actions_run_in_registration_order() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let engine = {
        let (a, b) = (Rc::clone(&order), Rc::clone(&order));
        Rc::new(
            ConventionEngine::new("ordered")
                .with(move |engine| {
                    engine.register_project_action(move |_, _| {
                        a.borrow_mut().push("first");
                        Ok(())
                    })
                })
                .with(move |engine| {
                    engine.register_project_action(move |_, _| {
                        b.borrow_mut().push("second");
                        Ok(())
                    })
                }),
        )
    };

    let mut build = Build::new("acme", "/work/acme");
    engine.apply(&mut build, ProjectId::ROOT).unwrap();

    assert_eq!(*order.borrow(), ["first", "second"]);
}

#[test]
fn engine_applied_to_many_projects_dispatches_once_per_invocation() {
    let count = Rc::new(Cell::new(0));
    let engine = {
        let count = Rc::clone(&count);
        Rc::new(ConventionEngine::new("java").with(move |engine| {
            engine.register_by_type(&types::JAVA_COMPILE, move |_| {
                count.set(count.get() + 1);
                Ok(())
            });
        }))
    };

    let config = Config::from_yaml("projects:\n  - path: \":a\"\n  - path: \":b\"\n").unwrap();
    let mut build = Build::from_config(&config, Path::new("/work/acme"), "acme").unwrap();
    for path in [":a", ":b"] {
        let id = build.tree().find(path).unwrap();
        add_task(&mut build, id, "compileJava", &types::JAVA_COMPILE);
        engine.apply(&mut build, id).unwrap();
    }
    assert_eq!(build.listener_count(), 1);

    build.finalize_graph(&requests(&["compileJava"])).unwrap();
    assert_eq!(count.get(), 2);

    // A fresh invocation is dispatched again.
    build.finalize_graph(&requests(&[":a:compileJava"])).unwrap();
    assert_eq!(count.get(), 3);
}

#[test]
fn listener_ignores_a_repeated_invocation() {
    let count = Rc::new(Cell::new(0));
    let engine = {
        let count = Rc::clone(&count);
        Rc::new(ConventionEngine::new("root").with(move |engine| {
            engine.register_by_type(&types::TASK, move |_| {
                count.set(count.get() + 1);
                Ok(())
            });
        }))
    };
    let mut build = Build::new("acme", "/work/acme");
    add_task(&mut build, ProjectId::ROOT, "build", &types::TASK);
    let ready = build.finalize_graph(&requests(&["build"])).unwrap();

    let mut task = Task::new(ProjectId::ROOT, ":", "build", &types::TASK, TaskWork::Lifecycle);
    engine.graph_ready(&ready.graph, vec![&mut task]).unwrap();
    let again = engine.graph_ready(&ready.graph, vec![&mut task]).unwrap();

    assert_eq!(count.get(), 1);
    assert_eq!(again, DispatchSummary::default());
}

#[test]
fn failing_action_surfaces_configuration_failure() {
    let engine = Rc::new(ConventionEngine::new("root").with(|engine| {
        engine.register_by_name("shadowJar", |task| task.merge_service_files());
    }));
    let mut build = Build::new("acme", "/work/acme");
    add_task(&mut build, ProjectId::ROOT, "shadowJar", &types::JAR);
    engine.apply(&mut build, ProjectId::ROOT).unwrap();

    let err = build.finalize_graph(&requests(&["shadowJar"])).unwrap_err();

    assert_eq!(err.exit_code(), crate::exit_codes::CONFIGURATION_FAILURE);
    assert!(err.to_string().contains(":shadowJar"));
}
