//! Task type hierarchy.
//!
//! Task kinds form a single-inheritance tree rooted at [`TASK`]. The set
//! shipped here covers what the host creates; consumers can declare more
//! as `static` values with one of these as parent. Type names must be
//! unique, since assignability compares names.

use std::fmt;

/// The runtime type of a task.
#[derive(Debug)]
pub struct TaskType {
    name: &'static str,
    parent: Option<&'static TaskType>,
}

impl TaskType {
    pub const fn new(name: &'static str, parent: Option<&'static TaskType>) -> Self {
        Self { name, parent }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static TaskType> {
        self.parent
    }

    /// True if `other` is this type or one of its subtypes.
    pub fn is_assignable_from(&self, other: &TaskType) -> bool {
        let mut current = Some(other);
        while let Some(candidate) = current {
            if candidate.name == self.name {
                return true;
            }
            current = candidate.parent;
        }
        false
    }
}

impl PartialEq for TaskType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TaskType {}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Root of the hierarchy; lifecycle tasks use it directly.
pub static TASK: TaskType = TaskType::new("DefaultTask", None);

pub static JAVA_COMPILE: TaskType = TaskType::new("JavaCompile", Some(&TASK));

pub static TEST: TaskType = TaskType::new("Test", Some(&TASK));

pub static JAVA_EXEC: TaskType = TaskType::new("JavaExec", Some(&TASK));

pub static ARCHIVE: TaskType = TaskType::new("AbstractArchiveTask", Some(&TASK));

pub static JAR: TaskType = TaskType::new("Jar", Some(&ARCHIVE));

/// Fat jar; the only archive that can merge service descriptors.
pub static SHADOW_JAR: TaskType = TaskType::new("ShadowJar", Some(&JAR));

pub static DELETE: TaskType = TaskType::new("Delete", Some(&TASK));

/// Writes IDE metadata.
pub static GENERATOR: TaskType = TaskType::new("GeneratorTask", Some(&TASK));

pub static MKDIRS: TaskType = TaskType::new("MkDirsTask", Some(&TASK));
