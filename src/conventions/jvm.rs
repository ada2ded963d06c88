//! Build-wide JVM conventions, applied to the root project.
//!
//! Task configurators registered here see every task of the graph, so they
//! reach the compile, test and exec tasks of all projects.

use super::jdt_problems::COMPILER_PROBLEMS;
use crate::engine::ConventionEngine;
use crate::ide::JDT_PREFS_FILE;
use crate::prefs::merge_into;
use crate::task::{Task, TaskContext, types};

pub const ENCODING: &str = "UTF-8";
pub const ENABLE_PREVIEW: &str = "--enable-preview";

/// Task tags and their priorities, in the order Eclipse lists them.
pub const TASK_TAGS: &[(&str, &str)] = &[
    ("XXX", "HIGH"),
    ("FIXME", "HIGH"),
    ("TODO", "NORMAL"),
    ("THINKME", "LOW"),
    ("LATER", "LOW"),
];

pub fn root(engine: &mut ConventionEngine) {
    // -------------------------------------------------------------------------
    // UTF-8 sources
    // -------------------------------------------------------------------------
    engine.register_by_type(&types::JAVA_COMPILE, |javac| {
        javac.compile_options_mut()?.encoding = Some(ENCODING.to_string());
        Ok(())
    });

    // -------------------------------------------------------------------------
    // Method parameter names in class files
    // -------------------------------------------------------------------------
    after_eclipse(engine, vec![(
        "org.eclipse.jdt.core.compiler.codegen.methodParameters",
        "generate".to_string(),
    )]);
    engine.register_by_type(&types::JAVA_COMPILE, |javac| {
        javac.compile_options_mut()?.compiler_arg("-parameters");
        Ok(())
    });

    // -------------------------------------------------------------------------
    // JUnit Platform
    // -------------------------------------------------------------------------
    engine.register_by_type(&types::TEST, |test| {
        test.test_options_mut()?.use_junit_platform = true;
        Ok(())
    });

    // -------------------------------------------------------------------------
    // Assertions
    // -------------------------------------------------------------------------
    engine.register_by_type(&types::TEST, |test| {
        test.fork_options_mut()?.enable_assertions = true;
        Ok(())
    });
    engine.register_by_type(&types::JAVA_EXEC, |exec| {
        exec.fork_options_mut()?.enable_assertions = true;
        Ok(())
    });

    // -------------------------------------------------------------------------
    // Quieter javac
    // -------------------------------------------------------------------------
    engine.register_by_type(&types::JAVA_COMPILE, |javac| {
        javac.compile_options_mut()?.warnings = false;
        Ok(())
    });

    // -------------------------------------------------------------------------
    // Preview language features
    // -------------------------------------------------------------------------
    engine.register_by_type(&types::JAVA_COMPILE, |javac| {
        javac.compile_options_mut()?.compiler_arg(ENABLE_PREVIEW);
        Ok(())
    });
    engine.register_by_type(&types::TEST, |test| {
        test.fork_options_mut()?.jvm_arg(ENABLE_PREVIEW);
        Ok(())
    });
    engine.register_by_type(&types::JAVA_EXEC, |exec| {
        exec.fork_options_mut()?.jvm_arg(ENABLE_PREVIEW);
        Ok(())
    });
    engine.register_project_action(|build, id| {
        for subproject in build.tree().subprojects(id) {
            build.after_evaluate(subproject, |build, id| {
                if let Some(application) = build.project_mut(id).application.as_mut() {
                    application.default_jvm_args.push(ENABLE_PREVIEW.to_string());
                }
                Ok(())
            });
        }
        Ok(())
    });
    after_eclipse(engine, vec![
        ("org.eclipse.jdt.core.compiler.problem.enablePreviewFeatures", "enabled".to_string()),
        ("org.eclipse.jdt.core.compiler.problem.reportPreviewFeatures", "warning".to_string()),
    ]);

    // -------------------------------------------------------------------------
    // Task tags
    // -------------------------------------------------------------------------
    let tags: Vec<&str> = TASK_TAGS.iter().map(|(tag, _)| *tag).collect();
    let priorities: Vec<&str> = TASK_TAGS.iter().map(|(_, priority)| *priority).collect();
    after_eclipse(engine, vec![
        ("org.eclipse.jdt.core.compiler.taskCaseSensitive", "enabled".to_string()),
        ("org.eclipse.jdt.core.compiler.taskTags", tags.join(",")),
        ("org.eclipse.jdt.core.compiler.taskPriorities", priorities.join(",")),
    ]);

    // -------------------------------------------------------------------------
    // Compiler problem severities
    // -------------------------------------------------------------------------
    after_eclipse(
        engine,
        COMPILER_PROBLEMS
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect(),
    );
}

/// Merge `entries` into the JDT preferences once the `eclipse` task has run.
fn after_eclipse(engine: &mut ConventionEngine, entries: Vec<(&'static str, String)>) {
    engine.register_by_name("eclipse", move |task: &mut Task| {
        let entries = entries.clone();
        task.do_last(move |ctx: &TaskContext<'_>| {
            merge_into(ctx.project_dir.join(JDT_PREFS_FILE), entries.iter().cloned())
        });
        Ok(())
    });
}
