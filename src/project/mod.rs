//! Project hierarchy.
//!
//! Projects live in a [`ProjectTree`] arena. A project refers to its parent
//! and children by [`ProjectId`]; these links are navigational only, the
//! tree owns every project.

mod group;

pub use group::group_for_path;

use crate::error::{ConveyorError, Result};
use crate::ide::EclipseModel;
use crate::task::Task;
use indexmap::IndexMap;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static PROJECT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid project name regex"));

/// Index of a project inside its [`ProjectTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(usize);

impl ProjectId {
    /// The root project of every tree.
    pub const ROOT: ProjectId = ProjectId(0);
}

/// A package/dependency source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub url: String,
}

impl Repository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Source and resource directories of one source set, relative to the
/// project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub name: String,
    pub java_dirs: Vec<PathBuf>,
    pub resource_dirs: Vec<PathBuf>,
}

impl SourceSet {
    /// A source set with the conventional `src/<name>/java` and
    /// `src/<name>/resources` layout.
    pub fn standard(name: &str) -> Self {
        let root = Path::new("src").join(name);
        Self {
            name: name.to_string(),
            java_dirs: vec![root.join("java")],
            resource_dirs: vec![root.join("resources")],
        }
    }

    /// Every directory of the set, sources first, without duplicates.
    pub fn all_dirs(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for dir in self.java_dirs.iter().chain(self.resource_dirs.iter()) {
            if !dirs.contains(&dir.as_path()) {
                dirs.push(dir);
            }
        }
        dirs
    }
}

/// Settings contributed by the `application` plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Application {
    pub main_class: Option<String>,
    pub default_jvm_args: Vec<String>,
}

#[derive(Debug)]
pub struct Project {
    id: ProjectId,
    path: String,
    name: String,
    dir: PathBuf,
    parent: Option<ProjectId>,
    children: Vec<ProjectId>,
    pub group: String,
    pub repositories: Vec<Repository>,
    plugins: Vec<String>,
    /// Source set names requested by the build description; materialized
    /// into [`Project::source_sets`] when the `java` plugin is applied.
    pub declared_source_sets: Vec<String>,
    pub source_sets: Vec<SourceSet>,
    /// Paths of projects this one depends on.
    pub project_dependencies: Vec<String>,
    pub application: Option<Application>,
    pub eclipse: Option<EclipseModel>,
    tasks: IndexMap<String, Task>,
}

impl Project {
    fn new(id: ProjectId, path: String, name: String, dir: PathBuf, parent: Option<ProjectId>) -> Self {
        Self {
            id,
            path,
            name,
            dir,
            parent,
            children: Vec::new(),
            group: String::new(),
            repositories: Vec::new(),
            plugins: Vec::new(),
            declared_source_sets: vec!["main".to_string(), "test".to_string()],
            source_sets: Vec::new(),
            project_dependencies: Vec::new(),
            application: None,
            eclipse: None,
            tasks: IndexMap::new(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Colon-delimited ancestry; the root project is `:`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn parent(&self) -> Option<ProjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ProjectId] {
        &self.children
    }

    pub fn has_plugin(&self, plugin: &str) -> bool {
        self.plugins.iter().any(|p| p == plugin)
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Record a plugin id; returns false if it was already applied.
    pub(crate) fn record_plugin(&mut self, plugin: &str) -> bool {
        if self.has_plugin(plugin) {
            return false;
        }
        self.plugins.push(plugin.to_string());
        true
    }

    /// Absolute source and resource directories of every source set.
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        self.source_sets
            .iter()
            .flat_map(|set| set.all_dirs())
            .map(|dir| self.dir.join(dir))
            .collect()
    }

    pub fn source_set(&self, name: &str) -> Option<&SourceSet> {
        self.source_sets.iter().find(|set| set.name == name)
    }

    /// Add a task; fails if the name is taken in this project.
    pub fn add_task(&mut self, task: Task) -> Result<&mut Task> {
        let name = task.name().to_string();
        if self.tasks.contains_key(&name) {
            return Err(ConveyorError::UserError(format!(
                "task '{}' already exists in project '{}'",
                name, self.path
            )));
        }
        Ok(self.tasks.entry(name).or_insert(task))
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn task_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.get_mut(name)
    }

    /// Like [`Project::task_mut`] but fails with a user error naming the task.
    pub fn require_task_mut(&mut self, name: &str) -> Result<&mut Task> {
        let path = self.path.clone();
        self.tasks.get_mut(name).ok_or_else(|| {
            ConveyorError::UserError(format!("task '{}' not found in project '{}'", name, path))
        })
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.values_mut()
    }
}

/// Arena of all projects of one build, root first.
#[derive(Debug)]
pub struct ProjectTree {
    projects: Vec<Project>,
}

impl ProjectTree {
    /// Create a tree holding only the root project.
    pub fn new(root_name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        let root = Project::new(ProjectId::ROOT, ":".to_string(), root_name.into(), root_dir.into(), None);
        Self { projects: vec![root] }
    }

    pub fn root(&self) -> &Project {
        &self.projects[ProjectId::ROOT.0]
    }

    /// Add a child project under `parent`. Its directory is the parent's
    /// directory joined with `name`.
    pub fn add_child(&mut self, parent: ProjectId, name: &str) -> Result<ProjectId> {
        if !PROJECT_NAME_REGEX.is_match(name) {
            return Err(ConveyorError::UserError(format!("invalid project name '{}'", name)));
        }
        let parent_project = self.get(parent);
        let path = if parent_project.path == ":" {
            format!(":{}", name)
        } else {
            format!("{}:{}", parent_project.path, name)
        };
        if self.find(&path).is_some() {
            return Err(ConveyorError::UserError(format!("project '{}' already exists", path)));
        }

        let id = ProjectId(self.projects.len());
        let dir = parent_project.dir.join(name);
        self.projects.push(Project::new(id, path, name.to_string(), dir, Some(parent)));
        self.projects[parent.0].children.push(id);
        Ok(id)
    }

    /// Add the project at `path`, creating missing ancestors on the way.
    pub fn add_path(&mut self, path: &str) -> Result<ProjectId> {
        if path == ":" {
            return Ok(ProjectId::ROOT);
        }
        let Some(relative) = path.strip_prefix(':') else {
            return Err(ConveyorError::UserError(format!(
                "project path '{}' must start with ':'",
                path
            )));
        };

        let mut current = ProjectId::ROOT;
        for segment in relative.split(':') {
            let child = self
                .get(current)
                .children
                .iter()
                .copied()
                .find(|&child| self.get(child).name == segment);
            current = match child {
                Some(child) => child,
                None => self.add_child(current, segment)?,
            };
        }
        Ok(current)
    }

    /// The project `id` refers to.
    ///
    /// Panics if `id` did not come from this tree.
    pub fn get(&self, id: ProjectId) -> &Project {
        &self.projects[id.0]
    }

    /// Mutable counterpart of [`ProjectTree::get`], with the same panic.
    pub fn get_mut(&mut self, id: ProjectId) -> &mut Project {
        &mut self.projects[id.0]
    }

    /// Look a project up by its path.
    ///
    /// # Returns
    ///
    /// * `Some(id)` - A project with exactly this path exists, e.g. `":services:billing"`
    /// * `None` - No such project; parent paths are not created on lookup
    pub fn find(&self, path: &str) -> Option<ProjectId> {
        self.projects.iter().find(|p| p.path == path).map(|p| p.id)
    }

    /// All projects, root first, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// Ids of all projects, in the same order as [`ProjectTree::iter`].
    /// Collected so callers can mutate the tree while walking them.
    pub fn ids(&self) -> Vec<ProjectId> {
        self.projects.iter().map(|p| p.id).collect()
    }

    /// Every descendant of `id`, depth-first in child order.
    pub fn subprojects(&self, id: ProjectId) -> Vec<ProjectId> {
        let mut out = Vec::new();
        let mut stack: Vec<ProjectId> = self.get(id).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.get(next).children.iter().rev().copied());
        }
        out
    }

    /// Group of `id`, derived from the root name and its ancestry.
    pub fn group_of(&self, id: ProjectId) -> String {
        group_for_path(&self.root().name, &self.get(id).path)
    }

    /// Mutable access to every task in every project.
    pub fn all_tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.projects.iter_mut().flat_map(|p| p.tasks.values_mut())
    }
}
