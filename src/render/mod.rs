//! Rendering navigation trees as nested lists.
//!
//! The rendering walk ([build_list], [build_list_item]) is independent of
//! any display surface. It drives a [RenderTarget], which only needs to
//! know how to create lists and items:
//!
//! ```text
//! NavTree ──→ build_list ──→ RenderTarget::create_list / create_*_item / append_item
//! ```
//!
//! # Built-in implementations
//! * [HtmlTarget](html::HtmlTarget) - builds an [Element](html::Element)
//!   tree that serializes to HTML
//!
//! # Custom implementations
//! You can implement [RenderTarget] to emit any nested list structure
//! (e.g. terminal output, JSON), reusing the tree building and walk.
//!
//! # Item identifiers
//! Every item with children carries a toggle identifier used to remember
//! its expanded state: `<prefix><dotted-path>`, where the prefix is
//! [TYPE_ID_PREFIX] or [MODULE_ID_PREFIX] depending on the list.

pub mod html;
pub mod nav_list;

pub use html::{Element, HtmlTarget, NavDrawer, create_mask};
pub use nav_list::{NavListBuilder, build_list, build_list_item};

/// ID prefix for items of the type list.
pub const TYPE_ID_PREFIX: &str = ".nav:";

/// ID prefix for items of the module list.
pub const MODULE_ID_PREFIX: &str = ".nav-module:";

/// Returns the ID prefix used for the module list (`true`) or the type
/// list (`false`).
pub fn id_prefix(modules: bool) -> &'static str {
    if modules {
        MODULE_ID_PREFIX
    } else {
        TYPE_ID_PREFIX
    }
}

// =#========================================================================#=
// LABEL
// =#========================================================================#=
/// Clickable label of one list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<'n> {
    /// Displayed text (the node key)
    pub text: &'n str,

    /// Link target with base path applied; `None` for pure grouping nodes
    pub href: Option<String>,

    /// Whether the linked entity is an interface
    pub interface: bool,

    /// Whether the linked entity is the page currently shown
    pub current: bool,
}

// =#========================================================================#=
// RENDER TARGET (trait)
// =#========================================================================#=
/// Abstraction of the surface a navigation list is rendered to.
///
/// The walk creates items bottom-up: the nested list of a node is complete
/// before its item is created, and every item is appended to exactly one
/// list.
pub trait RenderTarget {
    /// A list of items.
    type List;

    /// One entry of a list, possibly holding a nested list.
    type Item;

    /// Creates an empty list.
    fn create_list(&mut self) -> Self::List;

    /// Creates an item showing only its label.
    fn create_leaf_item(&mut self, label: &Label<'_>) -> Self::Item;

    /// Creates an expandable item showing its label and the nested list.
    ///
    /// # Arguments
    /// * `label` - Label of the item
    /// * `toggle_id` - Identifier for the expanded state, `<prefix><dotted-path>`
    /// * `children` - Already rendered nested list
    fn create_branch_item(
        &mut self,
        label: &Label<'_>,
        toggle_id: &str,
        children: Self::List,
    ) -> Self::Item;

    /// Appends `item` to the end of `list`.
    fn append_item(&mut self, list: &mut Self::List, item: Self::Item);
}
