//! `.classpath` generation and merge.

use super::{CLASSPATH_FILE, EclipseModel};
use crate::descriptor::{DescriptorTree, Node};
use crate::error::Result;
use crate::fs::atomic_write_file;
use crate::project::{Project, ProjectTree};
use std::path::Path;
use tracing::debug;

const JRE_CONTAINER: &str = "org.eclipse.jdt.launching.JRE_CONTAINER";

/// The classpath the host computes for `project` before any merge.
///
/// Source folders get `output="bin/<set>"`, project dependencies are
/// `kind="src"` entries without an output.
pub fn generate_classpath(project: &Project, tree: &ProjectTree) -> DescriptorTree {
    let mut root = Node::new("classpath");

    for set in &project.source_sets {
        for dir in set.all_dirs() {
            let scope = if set.name == "main" { "main,test" } else { set.name.as_str() };
            root.children.push(
                Node::new("classpathentry")
                    .attr("kind", "src")
                    .attr("output", format!("bin/{}", set.name))
                    .attr("path", dir.to_string_lossy())
                    .child(
                        Node::new("attributes")
                            .child(attribute("gradle_scope", &set.name))
                            .child(attribute("gradle_used_by_scope", scope)),
                    ),
            );
        }
    }

    root.children
        .push(Node::new("classpathentry").attr("kind", "con").attr("path", JRE_CONTAINER));

    for dependency in &project.project_dependencies {
        let Some(id) = tree.find(dependency) else {
            continue;
        };
        let dependency = tree.get(id);
        let name = dependency
            .eclipse
            .as_ref()
            .map_or(dependency.name(), |model| model.project_name.as_str());
        root.children.push(
            Node::new("classpathentry")
                .attr("combineaccessrules", "false")
                .attr("kind", "src")
                .attr("path", format!("/{}", name)),
        );
    }

    let output = project
        .eclipse
        .as_ref()
        .map(|model| model.default_output_dir.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bin".to_string());
    root.children
        .push(Node::new("classpathentry").attr("kind", "output").attr("path", output));

    DescriptorTree::new(root)
}

fn attribute(name: &str, value: &str) -> Node {
    Node::new("attribute").attr("name", name).attr("value", value)
}

/// Merge a freshly generated classpath into the one already on disk.
///
/// Generated entries come first. Existing entries are kept after them
/// unless an identical entry was generated, so an entry whose attributes
/// were rewritten after the last generation survives next to its
/// regenerated twin.
pub fn merge_with_existing(generated: DescriptorTree, existing: Option<DescriptorTree>) -> DescriptorTree {
    let Some(existing) = existing else {
        return generated;
    };

    let mut merged = generated;
    let kept: Vec<Node> = existing
        .root
        .children
        .into_iter()
        .filter(|entry| !merged.root.children.contains(entry))
        .collect();
    debug!(kept = kept.len(), "kept existing classpath entries");
    merged.root.children.extend(kept);
    merged
}

/// Generate, merge, run the hooks, and write `.classpath`.
pub fn write_classpath(project: &Project, tree: &ProjectTree, model: &EclipseModel) -> Result<()> {
    let path = project.dir().join(CLASSPATH_FILE);
    let existing = read_existing(&path)?;

    let mut merged = merge_with_existing(generate_classpath(project, tree), existing);
    model.classpath.finish(&mut merged)?;

    atomic_write_file(&path, &merged.to_xml())?;
    debug!(file = %path.display(), entries = merged.root.children.len(), "wrote classpath");
    Ok(())
}

fn read_existing(path: &Path) -> Result<Option<DescriptorTree>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| crate::error::ConveyorError::io("read", path, e))?;
    DescriptorTree::parse(&content).map(Some)
}
