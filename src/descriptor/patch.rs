//! Output-path rewriting for source-folder entries.

use super::{DescriptorHooks, DescriptorTree, Node};
use tracing::debug;

/// Element name of a classpath entry.
pub const ENTRY_TAG: &str = "classpathentry";

/// `kind` value of a source folder entry.
pub const SOURCE_KIND: &str = "src";

/// Attribute carrying a source folder's output directory.
pub const OUTPUT_ATTRIBUTE: &str = "output";

/// A node is rewritten only if it is a source entry that carries an output
/// path. Referenced projects are `kind="src"` too, but have no output.
pub fn is_rewrite_candidate(node: &Node) -> bool {
    node.name == ENTRY_TAG
        && node.attribute("kind") == Some(SOURCE_KIND)
        && node.attributes.contains_key(OUTPUT_ATTRIBUTE)
}

/// Replace `from_prefix` with `to_prefix` at the start of every candidate's
/// output path, breadth-first. Returns the number of rewritten nodes; a tree
/// with no candidates is left alone and yields zero.
pub fn patch_output_paths(tree: &mut DescriptorTree, from_prefix: &str, to_prefix: &str) -> usize {
    let mut rewritten = 0;

    tree.for_each_breadth_first_mut(|node| {
        if !is_rewrite_candidate(node) {
            return;
        }
        if let Some(output) = node.attributes.get_mut(OUTPUT_ATTRIBUTE)
            && let Some(rest) = output.strip_prefix(from_prefix)
        {
            *output = format!("{}{}", to_prefix, rest);
            rewritten += 1;
        }
    });

    debug!(from = from_prefix, to = to_prefix, rewritten, "patched descriptor output paths");
    rewritten
}

/// Install the rewrite so it runs after the host's merge step and before
/// serialization.
pub fn install_output_patch(
    hooks: &mut DescriptorHooks,
    from_prefix: impl Into<String>,
    to_prefix: impl Into<String>,
) {
    let from_prefix = from_prefix.into();
    let to_prefix = to_prefix.into();

    hooks.after_merge(move |merged| {
        let from_prefix = from_prefix.clone();
        let to_prefix = to_prefix.clone();
        merged.before_serialize(move |tree| {
            patch_output_paths(tree, &from_prefix, &to_prefix);
            Ok(())
        });
        Ok(())
    });
}
