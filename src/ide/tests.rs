use super::*;
use crate::descriptor::{DescriptorTree, Node, install_output_patch};
use crate::prefs::PreferenceStore;
use crate::project::{ProjectId, ProjectTree, SourceSet};
use tempfile::TempDir;

/// `acme` with `:core` and `:app`, where `:app` depends on `:core`.
fn java_tree(root_dir: &std::path::Path) -> (ProjectTree, ProjectId, ProjectId) {
    let mut tree = ProjectTree::new("acme", root_dir);
    let core = tree.add_child(ProjectId::ROOT, "core").unwrap();
    let app = tree.add_child(ProjectId::ROOT, "app").unwrap();

    for (id, name) in [(core, "acme:core"), (app, "acme:app")] {
        let project = tree.get_mut(id);
        project.record_plugin("java");
        project.source_sets = vec![SourceSet::standard("main"), SourceSet::standard("test")];
        project.eclipse = Some(EclipseModel::new(name));
    }
    tree.get_mut(app).project_dependencies = vec![":core".to_string()];
    (tree, core, app)
}

fn entries(tree: &DescriptorTree) -> Vec<(String, String)> {
    tree.root
        .children
        .iter()
        .map(|entry| {
            (
                entry.attribute("kind").unwrap_or_default().to_string(),
                entry.attribute("path").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

// =========================================================================
// .classpath
// =========================================================================

#[test]
fn generated_classpath_lists_sources_container_deps_and_output() {
    let dir = TempDir::new().unwrap();
    let (tree, _, app) = java_tree(dir.path());

    let classpath = generate_classpath(tree.get(app), &tree);

    assert_eq!(
        entries(&classpath),
        vec![
            ("src".to_string(), "src/main/java".to_string()),
            ("src".to_string(), "src/main/resources".to_string()),
            ("src".to_string(), "src/test/java".to_string()),
            ("src".to_string(), "src/test/resources".to_string()),
            ("con".to_string(), "org.eclipse.jdt.launching.JRE_CONTAINER".to_string()),
            ("src".to_string(), "/acme:core".to_string()),
            ("output".to_string(), "bin".to_string()),
        ]
    );

    let main = &classpath.root.children[0];
    assert_eq!(main.attribute("output"), Some("bin/main"));
    let scope = &main.children[0].children[1];
    assert_eq!(scope.attribute("name"), Some("gradle_used_by_scope"));
    assert_eq!(scope.attribute("value"), Some("main,test"));

    let dependency = &classpath.root.children[5];
    assert_eq!(dependency.attribute("combineaccessrules"), Some("false"));
    assert_eq!(dependency.attribute("output"), None);
}

#[test]
fn unknown_project_dependency_is_skipped() {
    let dir = TempDir::new().unwrap();
    let (mut tree, core, _) = java_tree(dir.path());
    tree.get_mut(core).project_dependencies = vec![":missing".to_string()];

    let classpath = generate_classpath(tree.get(core), &tree);
    assert!(!entries(&classpath).iter().any(|(_, path)| path == "/missing"));
}

#[test]
fn merge_without_existing_is_generated() {
    let generated = DescriptorTree::new(Node::new("classpath").child(Node::new("classpathentry")));
    assert_eq!(merge_with_existing(generated.clone(), None), generated);
}

#[test]
fn merge_drops_identical_and_keeps_differing_entries() {
    let entry = |output: &str| {
        Node::new("classpathentry")
            .attr("kind", "src")
            .attr("output", output)
            .attr("path", "src/main/java")
    };
    let generated = DescriptorTree::new(Node::new("classpath").child(entry("bin/main")));
    let existing = DescriptorTree::new(
        Node::new("classpath")
            .child(entry("bin/main"))
            .child(entry("build-eclipse/main"))
            .child(Node::new("classpathentry").attr("kind", "lib").attr("path", "lib/x.jar")),
    );

    let merged = merge_with_existing(generated, Some(existing));

    let outputs: Vec<Option<&str>> = merged
        .root
        .children
        .iter()
        .map(|entry| entry.attribute("output"))
        .collect();
    assert_eq!(outputs, vec![Some("bin/main"), Some("build-eclipse/main"), None]);
}

#[test]
fn write_classpath_runs_hooks_before_writing() {
    let dir = TempDir::new().unwrap();
    let (tree, core, _) = java_tree(dir.path());
    let mut model = EclipseModel::new("acme:core");
    install_output_patch(&mut model.classpath, "bin/", "build-eclipse/");

    let project = tree.get(core);
    std::fs::create_dir_all(project.dir()).unwrap();
    write_classpath(project, &tree, &model).unwrap();

    let written = std::fs::read_to_string(project.dir().join(CLASSPATH_FILE)).unwrap();
    let parsed = DescriptorTree::parse(&written).unwrap();
    let outputs: Vec<&str> = parsed
        .root
        .children
        .iter()
        .filter_map(|entry| entry.attribute("output"))
        .collect();
    assert_eq!(outputs.len(), 4);
    assert!(outputs.iter().all(|output| output.starts_with("build-eclipse/")));
}

#[test]
fn write_classpath_rejects_malformed_existing_file() {
    let dir = TempDir::new().unwrap();
    let (tree, core, _) = java_tree(dir.path());
    let project = tree.get(core);
    std::fs::create_dir_all(project.dir()).unwrap();
    std::fs::write(project.dir().join(CLASSPATH_FILE), "<classpath><classpathentry").unwrap();

    let err = write_classpath(project, &tree, &EclipseModel::new("acme:core")).unwrap_err();
    assert_eq!(err.exit_code(), crate::exit_codes::IO_FAILURE);
}

// =========================================================================
// JDT preferences
// =========================================================================

#[test]
fn jdt_scaffold_sets_language_level() {
    let store = jdt_scaffold();
    assert_eq!(store.get("eclipse.preferences.version"), Some("1"));
    assert_eq!(store.get("org.eclipse.jdt.core.compiler.source"), Some(JAVA_VERSION));
    assert_eq!(store.get("org.eclipse.jdt.core.compiler.compliance"), Some(JAVA_VERSION));
}

#[test]
fn write_jdt_prefs_keeps_unrelated_keys() {
    let dir = TempDir::new().unwrap();
    let (tree, core, _) = java_tree(dir.path());
    let project = tree.get(core);
    let path = project.dir().join(JDT_PREFS_FILE);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "org.eclipse.jdt.core.compiler.problem.unusedImport=ignore\n").unwrap();

    write_jdt_prefs(project).unwrap();

    let store = PreferenceStore::load(&path).unwrap();
    assert_eq!(store.get("org.eclipse.jdt.core.compiler.problem.unusedImport"), Some("ignore"));
    assert_eq!(store.get("org.eclipse.jdt.core.compiler.source"), Some(JAVA_VERSION));
}

#[test]
fn write_jdt_prefs_creates_settings_dir() {
    let dir = TempDir::new().unwrap();
    let (tree, core, _) = java_tree(dir.path());
    write_jdt_prefs(tree.get(core)).unwrap();
    assert!(tree.get(core).dir().join(JDT_PREFS_FILE).is_file());
}

// =========================================================================
// .project
// =========================================================================

#[test]
fn project_file_has_java_nature_and_builder() {
    let dir = TempDir::new().unwrap();
    let (tree, core, _) = java_tree(dir.path());
    let model = EclipseModel::new("acme:core");

    let description = generate_project_file(tree.get(core), &model);
    let nodes = description.breadth_first();

    let name = nodes.iter().find(|n| n.name == "name").unwrap();
    assert_eq!(name.text.as_deref(), Some("acme:core"));
    assert!(nodes
        .iter()
        .any(|n| n.name == "nature" && n.text.as_deref() == Some("org.eclipse.jdt.core.javanature")));
    assert!(nodes.iter().any(|n| n.name == "buildCommand"));
}

#[test]
fn project_file_without_java_has_no_nature() {
    let dir = TempDir::new().unwrap();
    let tree = ProjectTree::new("acme", dir.path());
    let description = generate_project_file(tree.root(), &EclipseModel::new("acme"));
    assert!(!description.breadth_first().iter().any(|n| n.name == "nature"));
}

#[test]
fn generated_files_are_project_relative() {
    let files = generated_files();
    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|f| f.is_relative()));
}
