//! Dossier-nav builds the navigation tree of a generated documentation site.
//!
//! The documentation generator emits a flat list of descriptors, one per
//! documented entity, identified by qualified names such as
//! `goog.array.ArrayLike`. This crate turns such a list into a collapsed,
//! sorted tree and renders it as an expandable nested list.
//! Core functionality provided:
//! - Registry: Load the [TypeRegistry] (types and modules) from JSON or from
//!   the `var TYPES = {...};` script generated pages load.
//! - Tree model: [NavTree] stores [TreeNode](model::TreeNode)s using the
//!   arena pattern, so no direct node references are stored, only indices.
//!   See [crate::model] for more details.
//! - Normalization: Chains of empty namespace wrappers are folded into
//!   dotted keys (`a.b`) and plain entities hand up accidental children;
//!   siblings are sorted by key.
//! - Rendering: A walk over the tree drives a
//!   [RenderTarget](render::RenderTarget); [HtmlTarget](render::HtmlTarget)
//!   produces HTML. See [crate::render].
//!
//! Limitations:
//! - Descriptors with the same qualified path are a malformed input and
//!   abort construction with a panic
//! - Expand/collapse behavior and styling are up to the page scripts
//!
//! # Usage patterns
//! 1. Quick functions below cover the common cases.
//! 2. Configure a [NavListBuilder](render::NavListBuilder) for full control
//!    over base path, current page and list kind, or drive your own
//!    [RenderTarget](render::RenderTarget).
//!
//! ## Example
//! ```
//! use dossier_nav::model::Descriptor;
//! use dossier_nav::build_nav_tree;
//!
//! let descriptors = vec![
//!     Descriptor::new("a.b.C", "a.b.C.html"),
//!     Descriptor::new("a.b.D", "a.b.D.html"),
//! ];
//! let tree = build_nav_tree(&descriptors);
//! assert_eq!(tree.top_level_keys(), vec!["a.b"]);
//! ```

pub mod error;
pub mod model;
pub mod render;

use crate::error::NavResult;
use crate::model::{Descriptor, NavTree, TypeRegistry};
use crate::render::{HtmlTarget, NavDrawer, NavListBuilder};
use std::path::Path;

pub use crate::error::NavError;

// ============================================================================
// Quick API
// ============================================================================
/// Reads a [TypeRegistry] from a JSON file or a `var TYPES = {...};` script.
///
/// See [`TypeRegistry::from_file`] for full documentation.
pub fn load_registry<P: AsRef<Path>>(path: P) -> NavResult<TypeRegistry> {
    TypeRegistry::from_file(path)
}

/// Builds the collapsed and sorted tree of global-scope descriptors.
///
/// # Panics
/// Panics if two descriptors resolve to the same qualified path.
pub fn build_nav_tree(descriptors: &[Descriptor]) -> NavTree<'_> {
    NavTree::build(descriptors, false)
}

/// Builds the collapsed and sorted tree of module descriptors.
///
/// # Panics
/// Panics if two nested types of a module resolve to the same path.
pub fn build_module_tree(modules: &[Descriptor]) -> NavTree<'_> {
    NavTree::build(modules, true)
}

/// Renders the descriptors as an HTML nested list.
///
/// # Arguments
/// * `descriptors` - Entities to list
/// * `base_path` - Prefix for every link
/// * `current_path` - Link target of the page the list is shown on
/// * `is_module` - Whether the descriptors describe modules
///
/// # Panics
/// Panics if two descriptors resolve to the same path.
pub fn render_nav_html(
    descriptors: &[Descriptor],
    base_path: &str,
    current_path: &str,
    is_module: bool,
) -> String {
    NavListBuilder::new()
        .with_base_path(base_path)
        .with_current_path(current_path)
        .with_modules(is_module)
        .build(descriptors, &mut HtmlTarget::new())
        .to_html()
}

/// Renders type list, module list and mask for the page at `current_path`.
///
/// See [`NavDrawer::render`] for full documentation.
pub fn render_nav_drawer(registry: &TypeRegistry, base_path: &str, current_path: &str) -> NavDrawer {
    NavDrawer::render(registry, base_path, current_path)
}
