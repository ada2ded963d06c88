//! Generated descriptor trees and the patch pass over them.
//!
//! A descriptor is the hierarchical IDE metadata the host writes (the
//! `.classpath` of a project, for instance). Hosts expose two hook points
//! per generation, see [`DescriptorHooks`]; [`install_output_patch`] uses
//! them to move source-folder output paths under a different prefix.

mod hooks;
mod patch;
mod tree;


pub use hooks::{DescriptorHooks, MergedDescriptor, MergedHook, SerializeHook};
pub use patch::{
    ENTRY_TAG, OUTPUT_ATTRIBUTE, SOURCE_KIND, install_output_patch, is_rewrite_candidate,
    patch_output_paths,
};
pub use tree::{DescriptorTree, Node};
