//! JDT preference scaffold written by `eclipseJdt`.

use super::JDT_PREFS_FILE;
use crate::error::Result;
use crate::prefs::PreferenceStore;
use crate::project::Project;
use tracing::debug;

/// Language level written into the scaffold.
pub const JAVA_VERSION: &str = "13";

/// Minimal preferences every generated project starts with.
pub fn jdt_scaffold() -> PreferenceStore {
    let mut store = PreferenceStore::new();
    store.set("eclipse.preferences.version", "1");
    store.set("org.eclipse.jdt.core.compiler.codegen.targetPlatform", JAVA_VERSION);
    store.set("org.eclipse.jdt.core.compiler.compliance", JAVA_VERSION);
    store.set("org.eclipse.jdt.core.compiler.source", JAVA_VERSION);
    store
}

/// Write the scaffold, keeping unrelated keys of an existing file.
pub fn write_jdt_prefs(project: &Project) -> Result<()> {
    let path = project.dir().join(JDT_PREFS_FILE);
    let mut store = if path.exists() {
        PreferenceStore::load(&path)?
    } else {
        PreferenceStore::new()
    };

    store.merge(jdt_scaffold().iter().map(|(k, v)| (k.to_string(), v.to_string())));
    store.save(&path)?;

    debug!(file = %path.display(), "wrote jdt preferences");
    Ok(())
}
