//! `.project` generation.

use super::{EclipseModel, PROJECT_FILE};
use crate::descriptor::{DescriptorTree, Node};
use crate::error::Result;
use crate::fs::atomic_write_file;
use crate::project::Project;

const JAVA_NATURE: &str = "org.eclipse.jdt.core.javanature";
const JAVA_BUILDER: &str = "org.eclipse.jdt.core.javabuilder";

pub fn generate_project_file(project: &Project, model: &EclipseModel) -> DescriptorTree {
    let mut natures = Node::new("natures");
    let mut build_spec = Node::new("buildSpec");
    if project.has_plugin("java") {
        natures = natures.child(Node::new("nature").with_text(JAVA_NATURE));
        build_spec = build_spec.child(
            Node::new("buildCommand")
                .child(Node::new("name").with_text(JAVA_BUILDER))
                .child(Node::new("arguments")),
        );
    }

    DescriptorTree::new(
        Node::new("projectDescription")
            .child(Node::new("name").with_text(&model.project_name))
            .child(Node::new("comment").with_text(format!("Project {} created by conveyor", project.path())))
            .child(Node::new("projects"))
            .child(natures)
            .child(build_spec),
    )
}

pub fn write_project_file(project: &Project, model: &EclipseModel) -> Result<()> {
    let path = project.dir().join(PROJECT_FILE);
    atomic_write_file(&path, &generate_project_file(project, model).to_xml())
}
