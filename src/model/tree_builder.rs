//! Building a navigation tree from descriptors.
//!
//! Construction runs in three passes over a [NavTree]:
//!
//! ```text
//! descriptors ──→ build (find-or-create walk) ──→ collapse ──→ sort ──→ tree
//! ```
//!
//! 1. **Build**: every descriptor is placed at the path given by its
//!    qualified name, creating valueless nodes for missing segments.
//!    Modules are placed directly below the root under their plain name,
//!    with their nested types built below them.
//! 2. **Collapse** ([collapse_nodes](NavTree::collapse_nodes)): post-order,
//!    two rules per node applied to its direct children:
//!    - *Rule A*: a valueless child with exactly one child is removed and
//!      its child takes its place, keyed `child.grandchild`.
//!    - *Rule B*: a child whose value is neither a namespace nor carries
//!      nested types, but which has children, hands its children up to
//!      this node (keyed `child.grandchild`) and stays as a leaf.
//! 3. **Sort** ([sort_tree](NavTree::sort_tree)): children ordered by key,
//!    comparing UTF-16 code units.
//!
//! The two rules only rewrite direct children of the node being processed;
//! since descendants were collapsed before, the result does not depend on
//! the order of the input descriptors.

use crate::model::descriptor::Descriptor;
use crate::model::tree::{NavTree, NodeIndex};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Separator of qualified name segments, also used to join collapsed keys.
pub const SEGMENT_SEPARATOR: char = '.';

// ============================================================================
// Building (pub)
// ============================================================================
impl<'a> NavTree<'a> {
    /// Builds a collapsed and sorted tree whose sentinel root represents
    /// global scope.
    ///
    /// # Arguments
    /// * `descriptors` - Entities to place in the tree
    /// * `is_module` - Whether the descriptors describe modules (placed below
    ///   the root under their name) or global-scope entities (placed by
    ///   qualified name)
    ///
    /// # Panics
    /// Panics if two descriptors resolve to the same path, if two modules
    /// share a name, or if a global-scope descriptor has an empty qualified
    /// name.
    ///
    /// # Example
    /// ```
    /// use dossier_nav::model::{Descriptor, NavTree};
    ///
    /// let descriptors = vec![
    ///     Descriptor::new("x", "x.html"),
    ///     Descriptor::new("x.Y", "x.Y.html"),
    /// ];
    /// let tree = NavTree::build(&descriptors, false);
    /// assert_eq!(tree.top_level_keys(), vec!["x", "x.Y"]);
    /// ```
    pub fn build(descriptors: &'a [Descriptor], is_module: bool) -> Self {
        let mut tree = NavTree::new();
        let root = tree.root_index();
        tree.build_tree(descriptors, is_module, root);
        tree
    }

    /// Places `descriptors` below `root`, then collapses and sorts the
    /// subtree of `root`.
    ///
    /// For qualified names, a first segment equal to the key of `root` is
    /// skipped when walking down from `root`, so a root standing for a
    /// module may receive types qualified with the module name.
    ///
    /// # Returns
    /// `root`, for chaining.
    ///
    /// # Panics
    /// Panics if two descriptors resolve to the same path, if a descriptor
    /// would replace the value of `root`, or on any other broken tree
    /// invariant (see [add_child](NavTree::add_child)).
    pub fn build_tree(
        &mut self,
        descriptors: &'a [Descriptor],
        is_module: bool,
        root: NodeIndex,
    ) -> NodeIndex {
        for descriptor in descriptors {
            if is_module {
                self.add_module(descriptor, root);
            } else {
                self.add_qualified(descriptor, root);
            }
        }

        // An empty root has nothing to normalize
        if self[root].children().is_some() {
            self.collapse_nodes(root);
        }
        self.sort_tree(root);

        debug!(
            descriptors = descriptors.len(),
            is_module,
            root_key = self[root].key(),
            top_level = self[root].child_count(),
            "Built navigation tree"
        );

        root
    }

    /// Adds a module node below `root`, with its nested types below it.
    fn add_module(&mut self, descriptor: &'a Descriptor, root: NodeIndex) {
        assert!(
            self.find_child(root, &descriptor.name).is_none(),
            "Two modules share the name '{}'",
            descriptor.name
        );
        let module_root = self.add_node(descriptor.name.as_str(), Some(descriptor));
        self.add_child(root, module_root);

        if let Some(types) = &descriptor.types {
            let ret = self.build_tree(types, false, module_root);
            assert_eq!(ret, module_root);
        }
    }

    /// Walks (and extends) the path of the qualified name, attaching the
    /// descriptor to the final node.
    fn add_qualified(&mut self, descriptor: &'a Descriptor, root: NodeIndex) {
        let mut segments = descriptor.qualified_name.split(SEGMENT_SEPARATOR).peekable();
        if segments.peek() == Some(&self[root].key()) {
            segments.next();
        }

        let mut current = root;
        for segment in segments {
            current = match self.find_child(current, segment) {
                Some(found) => found,
                None => {
                    let created = self.add_node(segment, None);
                    self.add_child(current, created);
                    created
                }
            };
        }

        assert_ne!(
            current, root,
            "Descriptor '{}' ({}) has no qualified name below '{}'",
            descriptor.name,
            descriptor.href,
            self[root].key()
        );
        assert!(
            !self[current].has_value(),
            "Two descriptors resolve to the same path: '{}'",
            descriptor.qualified_name
        );
        self[current].set_value(Some(descriptor));
    }
}

// ============================================================================
// Collapsing (pub)
// ============================================================================
impl<'a> NavTree<'a> {
    /// Collapses the subtree of `index` (post-order), such that every node
    /// has a value and only namespaces and containers have children.
    ///
    /// # Panics
    /// Panics if the subtree contains a node with neither value nor children.
    pub fn collapse_nodes(&mut self, index: NodeIndex) {
        let Some(children) = self[index].children().map(<[NodeIndex]>::to_vec) else {
            assert!(
                self[index].has_value(),
                "Node {index} ('{}') has neither value nor children",
                self[index].key()
            );
            return;
        };

        for &child in &children {
            self.collapse_nodes(child);
        }

        // Rule A: fold valueless single-child wrappers into their child
        let wrappers: Vec<NodeIndex> = children
            .iter()
            .copied()
            .filter(|&c| !self[c].has_value() && self[c].child_count() == 1)
            .collect();
        for child in wrappers {
            self.remove_child(index, child);
            self.hoist_children(index, child);
        }

        // Rule B: plain entities hand their children up and stay as leaves
        let pass_through: Vec<NodeIndex> = self[index]
            .children()
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|&c| self.is_pass_through(c))
            .collect();
        for child in pass_through {
            self.hoist_children(index, child);
        }
    }

    /// Returns `true` if the node has children but its value is a plain
    /// entity (neither namespace nor container of types).
    fn is_pass_through(&self, index: NodeIndex) -> bool {
        let node = &self[index];
        match node.value() {
            Some(value) => !value.namespace && !value.has_types() && node.child_count() > 0,
            None => false,
        }
    }

    /// Moves all children of `from` to `to`, prefixing their keys with the
    /// key of `from`.
    fn hoist_children(&mut self, to: NodeIndex, from: NodeIndex) {
        let Some(grandchildren) = self.remove_children(from) else {
            return;
        };

        let prefix = self[from].key().to_string();
        for grandchild in grandchildren {
            let key = format!("{prefix}{SEGMENT_SEPARATOR}{}", self[grandchild].key());
            trace!(from = %prefix, key = %key, "Hoisting node");
            self[grandchild].set_key(key);
            self.add_child(to, grandchild);
        }
    }
}

// ============================================================================
// Sorting (pub)
// ============================================================================
impl NavTree<'_> {
    /// Sorts the children of every node in the subtree of `index` by key.
    ///
    /// Keys are compared by UTF-16 code units, which gives the same order
    /// as the string comparison in the browser.
    pub fn sort_tree(&mut self, index: NodeIndex) {
        let Some(mut children) = self[index].children.take() else {
            return;
        };

        children.sort_by(|&a, &b| compare_keys(self[a].key(), self[b].key()));
        for &child in &children {
            self.sort_tree(child);
        }

        self[index].children = Some(children);
    }
}

/// Compares two keys by their UTF-16 code units.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}
