//! Rendering walk from a [NavTree] to a nested list.
//!
//! Use [NavListBuilder] to configure base path, current page and list kind,
//! or the [build_list] shortcut for the common case.

use crate::model::tree_builder::SEGMENT_SEPARATOR;
use crate::model::{Descriptor, NavTree, NodeIndex};
use crate::render::{Label, RenderTarget, id_prefix};
use tracing::debug;

/// Separator appended to a non-empty base path.
const PATH_SEPARATOR: char = '/';

/// Builds a nested list for the given descriptors.
///
/// Shortcut for configuring a [NavListBuilder].
///
/// # Arguments
/// * `descriptors` - Entities to list
/// * `base_path` - Prefix for every link
/// * `current_path` - Link target of the page being rendered
/// * `is_module` - Whether the descriptors describe modules
/// * `target` - Surface to render to
///
/// # Panics
/// Panics if two descriptors resolve to the same path.
pub fn build_list<T: RenderTarget>(
    descriptors: &[Descriptor],
    base_path: &str,
    current_path: &str,
    is_module: bool,
    target: &mut T,
) -> T::List {
    NavListBuilder::new()
        .with_base_path(base_path)
        .with_current_path(current_path)
        .with_modules(is_module)
        .build(descriptors, target)
}

/// Renders the node at `index` and, recursively, its children.
///
/// # Arguments
/// * `tree` - Collapsed and sorted tree
/// * `index` - Node to render
/// * `base_path` - Prefix for every link, already ending in `/` if non-empty
/// * `current_path` - Link target of the page being rendered
/// * `id_prefix` - Prefix of the toggle identifier of this node
/// * `target` - Surface to render to
///
/// # Panics
/// Panics if a node in the subtree has neither value nor children.
pub fn build_list_item<T: RenderTarget>(
    tree: &NavTree<'_>,
    index: NodeIndex,
    base_path: &str,
    current_path: &str,
    id_prefix: &str,
    target: &mut T,
) -> T::Item {
    let node = &tree[index];
    assert!(
        node.has_value() || node.child_count() > 0,
        "Cannot render node {index} ('{}') with neither value nor children",
        node.key()
    );

    let value = node.value();
    let label = Label {
        text: node.key(),
        href: value.map(|v| format!("{base_path}{}", v.href)),
        interface: value.is_some_and(|v| v.interface),
        current: value.is_some_and(|v| v.href == current_path),
    };

    match node.children() {
        Some(children) => {
            let child_prefix = format!("{id_prefix}{}{SEGMENT_SEPARATOR}", node.key());
            let mut list = target.create_list();
            for &child in children {
                let item =
                    build_list_item(tree, child, base_path, current_path, &child_prefix, target);
                target.append_item(&mut list, item);
            }

            let toggle_id = format!("{id_prefix}{}", node.key());
            target.create_branch_item(&label, &toggle_id, list)
        }
        None => target.create_leaf_item(&label),
    }
}

// =#========================================================================#=
// NAV LIST BUILDER
// =#========================================================================#=
/// Configuration for rendering a navigation list.
///
/// # Configuration Options
/// * **Base path**: prefix of every link, e.g. `../` for nested pages
///   - [`with_base_path()`](Self::with_base_path)
/// * **Current page**: link target of the page the list is shown on,
///   whose item gets marked as current
///   - [`with_current_path()`](Self::with_current_path)
/// * **List kind**: global-scope types (default) or modules; selects how
///   descriptors are placed and the toggle ID prefix
///   - [`modules()`](Self::modules), [`types()`](Self::types)
///
/// # Example
/// ```
/// use dossier_nav::model::Descriptor;
/// use dossier_nav::render::{HtmlTarget, NavListBuilder};
///
/// let descriptors = vec![Descriptor::new("a.b.C", "a.b.C.html")];
/// let list = NavListBuilder::new()
///     .with_base_path("..")
///     .with_current_path("a.b.C.html")
///     .build(&descriptors, &mut HtmlTarget::new());
///
/// assert!(list.to_html().contains("href=\"../a.b.C.html\""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavListBuilder {
    base_path: String,
    current_path: String,
    modules: bool,
}

impl NavListBuilder {
    /// Creates a builder for a type list with empty base and current path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix for every link; a `/` is appended if missing.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = normalize_base_path(base_path.into());
        self
    }

    /// Sets the link target of the page being rendered.
    pub fn with_current_path(mut self, current_path: impl Into<String>) -> Self {
        self.current_path = current_path.into();
        self
    }

    /// Renders a module list.
    pub fn modules(self) -> Self {
        self.with_modules(true)
    }

    /// Renders a list of global-scope types (default).
    pub fn types(self) -> Self {
        self.with_modules(false)
    }

    /// Selects the list kind by flag.
    pub fn with_modules(mut self, modules: bool) -> Self {
        self.modules = modules;
        self
    }

    /// Returns the normalized base path.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the current page path.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Returns `true` if a module list is configured.
    pub fn is_module(&self) -> bool {
        self.modules
    }

    /// Builds the tree for `descriptors` and renders it.
    ///
    /// # Panics
    /// Panics if two descriptors resolve to the same path.
    pub fn build<T: RenderTarget>(&self, descriptors: &[Descriptor], target: &mut T) -> T::List {
        let tree = NavTree::build(descriptors, self.modules);
        self.render(&tree, target)
    }

    /// Renders an already built tree; the root itself is not rendered,
    /// only its children.
    pub fn render<T: RenderTarget>(&self, tree: &NavTree<'_>, target: &mut T) -> T::List {
        let prefix = id_prefix(self.modules);
        let mut list = target.create_list();
        let children = tree.root().children().unwrap_or_default();
        for &child in children {
            let item = build_list_item(
                tree,
                child,
                &self.base_path,
                &self.current_path,
                prefix,
                target,
            );
            target.append_item(&mut list, item);
        }

        debug!(
            items = children.len(),
            modules = self.modules,
            current = %self.current_path,
            "Rendered navigation list"
        );
        list
    }
}

/// Appends `/` to a non-empty base path not already ending in one.
fn normalize_base_path(mut base_path: String) -> String {
    if !base_path.is_empty() && !base_path.ends_with(PATH_SEPARATOR) {
        base_path.push(PATH_SEPARATOR);
    }
    base_path
}
