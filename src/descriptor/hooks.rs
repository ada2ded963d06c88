//! Two-phase descriptor hooks.
//!
//! The host generates a descriptor, merges it with whatever is already on
//! disk, and then calls [`DescriptorHooks::finish`]: every after-merge hook
//! runs first, then every before-serialize hook, including the ones that
//! after-merge hooks registered while they ran. The tree is written out
//! right after.

use super::DescriptorTree;
use crate::error::Result;
use std::fmt;

/// A last-chance mutation applied right before serialization.
pub type SerializeHook = Box<dyn Fn(&mut DescriptorTree) -> Result<()>>;

/// A hook that sees the host-merged tree.
pub type MergedHook = Box<dyn Fn(&mut MergedDescriptor<'_>) -> Result<()>>;

/// View handed to after-merge hooks.
pub struct MergedDescriptor<'a> {
    tree: &'a mut DescriptorTree,
    deferred: &'a mut Vec<SerializeHook>,
}

impl MergedDescriptor<'_> {
    pub fn tree(&self) -> &DescriptorTree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DescriptorTree {
        self.tree
    }

    /// Register a hook for the serialize phase of this same generation.
    pub fn before_serialize<F>(&mut self, hook: F)
    where
        F: Fn(&mut DescriptorTree) -> Result<()> + 'static,
    {
        self.deferred.push(Box::new(hook));
    }
}

/// Hooks attached to one generated descriptor file.
#[derive(Default)]
pub struct DescriptorHooks {
    after_merge: Vec<MergedHook>,
    before_serialize: Vec<SerializeHook>,
}

impl DescriptorHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after_merge<F>(&mut self, hook: F)
    where
        F: Fn(&mut MergedDescriptor<'_>) -> Result<()> + 'static,
    {
        self.after_merge.push(Box::new(hook));
    }

    pub fn before_serialize<F>(&mut self, hook: F)
    where
        F: Fn(&mut DescriptorTree) -> Result<()> + 'static,
    {
        self.before_serialize.push(Box::new(hook));
    }

    pub fn is_empty(&self) -> bool {
        self.after_merge.is_empty() && self.before_serialize.is_empty()
    }

    /// Run both phases against the merged tree. The first failing hook
    /// aborts the generation.
    pub fn finish(&self, tree: &mut DescriptorTree) -> Result<()> {
        let mut deferred = Vec::new();

        for hook in &self.after_merge {
            hook(&mut MergedDescriptor {
                tree: &mut *tree,
                deferred: &mut deferred,
            })?;
        }

        for hook in self.before_serialize.iter().chain(deferred.iter()) {
            hook(tree)?;
        }

        Ok(())
    }
}

impl fmt::Debug for DescriptorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorHooks")
            .field("after_merge", &self.after_merge.len())
            .field("before_serialize", &self.before_serialize.len())
            .finish()
    }
}
