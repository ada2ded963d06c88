//! Typed configuration groups carried by tasks.
//!
//! Which groups a task carries follows from its type; asking a task for a
//! group it does not have is a configuration failure, not a silent no-op.

use super::types::{ARCHIVE, JAVA_COMPILE, JAVA_EXEC, TEST, TaskType};

/// Compiler settings of a compile task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub encoding: Option<String>,
    pub compiler_args: Vec<String>,
    /// Whether the compiler reports warnings.
    pub warnings: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            encoding: None,
            compiler_args: Vec::new(),
            warnings: true,
        }
    }
}

impl CompileOptions {
    pub fn compiler_arg(&mut self, arg: impl Into<String>) {
        self.compiler_args.push(arg.into());
    }
}

/// Settings of tasks that fork a JVM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForkOptions {
    pub jvm_args: Vec<String>,
    pub enable_assertions: bool,
    pub main_class: Option<String>,
}

impl ForkOptions {
    pub fn jvm_arg(&mut self, arg: impl Into<String>) {
        self.jvm_args.push(arg.into());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOptions {
    pub use_junit_platform: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub archive_name: String,
    pub merge_service_files: bool,
}

/// All option groups; absent groups do not apply to the task's type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOptions {
    pub compile: Option<CompileOptions>,
    pub fork: Option<ForkOptions>,
    pub test: Option<TestOptions>,
    pub archive: Option<ArchiveOptions>,
}

impl TaskOptions {
    /// The option groups a task of `task_type` starts with.
    pub fn for_type(task_type: &TaskType) -> Self {
        let forks = TEST.is_assignable_from(task_type) || JAVA_EXEC.is_assignable_from(task_type);
        Self {
            compile: JAVA_COMPILE
                .is_assignable_from(task_type)
                .then(CompileOptions::default),
            fork: forks.then(ForkOptions::default),
            test: TEST.is_assignable_from(task_type).then(TestOptions::default),
            archive: ARCHIVE
                .is_assignable_from(task_type)
                .then(ArchiveOptions::default),
        }
    }
}
