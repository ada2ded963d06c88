//! Group naming from project hierarchy position.

/// `root_name` followed by the project's ancestor path segments, excluding
/// the project itself, all joined with dots.
///
/// `:services:billing` under `acme` is `acme.services`; the root project and
/// its direct children are plain `acme`.
pub fn group_for_path(root_name: &str, project_path: &str) -> String {
    let parent_path = project_path
        .rfind(':')
        .map_or("", |idx| &project_path[..idx]);
    let ancestors: Vec<&str> = parent_path.split(':').filter(|s| !s.is_empty()).collect();

    if ancestors.is_empty() {
        root_name.to_string()
    } else {
        format!("{}.{}", root_name, ancestors.join("."))
    }
}
