//! Data model for navigation trees.
//!
//! # Tree representation
//! Trees are represented by [NavTree], which uses the arena pattern to store
//! [TreeNode]s referenced by [NodeIndex]. The root is a sentinel for global
//! scope; every other node is one segment of a qualified name and may
//! denote a documented entity via its [Descriptor].
//!
//! # Building trees
//! [NavTree::build] places descriptors by qualified name (or, for modules,
//! by plain name), then normalizes the tree:
//!
//! | Pass | Method | Effect |
//! |------|--------|--------|
//! | Collapse | [NavTree::collapse_nodes] | Folds empty wrappers into dotted keys |
//! | Sort | [NavTree::sort_tree] | Orders siblings by key |
//!
//! See the [tree_builder] module docs for the collapsing rules.

pub mod descriptor;
pub mod node;
pub mod tree;
pub mod tree_builder;

pub use descriptor::Descriptor;
pub use descriptor::TypeRegistry;
pub use node::TreeNode;
pub use tree::NavTree;
pub use tree::NodeIndex;
pub use tree_builder::compare_keys;
