//! Navigation tree using the arena pattern.
//!
//! Provides:
//! * [NavTree] - arena of [TreeNode]s with a sentinel root for global scope
//! * [NodeIndex] as type used to index nodes in the tree
//! * [PreOrderIter] and [PostOrderIter] traversals from the root

use crate::model::descriptor::Descriptor;
use crate::model::node::TreeNode;
use std::collections::HashSet;
use std::fmt::Write;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// The sentinel root is always the first node of the arena.
const ROOT_INDEX: NodeIndex = 0;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A navigation tree represented using the arena pattern on [TreeNode].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// Each node holds a back-reference to its parent and an ordered list of
/// children, so parents own their children by index only.
///
/// # Structure
/// - The root is a sentinel with an empty key and no value, representing
///   global scope. It is never rendered, only its children are.
/// - Node values borrow the caller's [Descriptor]s, which are never mutated.
/// - Detached nodes (removed from their parent) stay in the arena but are
///   not reachable from the root, so traversals skip them.
///
/// # Construction
/// Use [build](NavTree::build) to obtain a collapsed and sorted tree from
/// descriptors, or create nodes with [add_node](NavTree::add_node) and link
/// them with [add_child](NavTree::add_child).
/// Test validity with [`NavTree::is_valid()`].
#[derive(Debug, Clone)]
pub struct NavTree<'a> {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<TreeNode<'a>>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl<'a> NavTree<'a> {
    /// Creates a tree consisting of the sentinel root only.
    pub fn new() -> Self {
        NavTree {
            nodes: vec![TreeNode::new("", None)],
        }
    }

    /// Creates a tree whose root has the given key and value.
    ///
    /// Useful to build the types of a single module, where the root stands
    /// for the module itself.
    pub fn with_root(key: impl Into<String>, value: Option<&'a Descriptor>) -> Self {
        NavTree {
            nodes: vec![TreeNode::new(key, value)],
        }
    }

    /// Adds a detached node to the arena, returning its index.
    pub fn add_node(&mut self, key: impl Into<String>, value: Option<&'a Descriptor>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(TreeNode::new(key, value));
        index
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> NodeIndex {
        ROOT_INDEX
    }

    /// Returns a reference to the root node.
    pub fn root(&self) -> &TreeNode<'a> {
        &self[ROOT_INDEX]
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &TreeNode<'a> {
        &self[index]
    }

    /// Returns a mutable reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut TreeNode<'a> {
        &mut self.nodes[index]
    }

    /// Returns the number of nodes in the arena, detached ones included.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of nodes reachable from the root, root included.
    pub fn num_nodes(&self) -> usize {
        self.pre_order_iter().count()
    }

    /// Returns the number of reachable nodes that denote a documented entity.
    pub fn num_values(&self) -> usize {
        self.pre_order_iter().filter(|(_, n)| n.has_value()).count()
    }

    /// Returns the keys of the root's children, in order.
    pub fn top_level_keys(&self) -> Vec<&str> {
        self.child_keys(ROOT_INDEX)
    }

    /// Returns the keys of the children of `index`, in order.
    pub fn child_keys(&self, index: NodeIndex) -> Vec<&str> {
        self[index]
            .children()
            .unwrap_or_default()
            .iter()
            .map(|&c| self[c].key())
            .collect()
    }

    /// Follows a path of exact keys from the root.
    ///
    /// # Example
    /// ```
    /// use dossier_nav::model::{Descriptor, NavTree};
    ///
    /// let descriptors = vec![
    ///     Descriptor::new("a.b.C", "a.b.C.html"),
    ///     Descriptor::new("a.b.D", "a.b.D.html"),
    /// ];
    /// let tree = NavTree::build(&descriptors, false);
    /// let c = tree.find_path(&["a.b", "C"]).unwrap();
    /// assert_eq!(tree[c].value().unwrap().href, "a.b.C.html");
    /// ```
    pub fn find_path(&self, keys: &[&str]) -> Option<NodeIndex> {
        keys.iter()
            .try_fold(ROOT_INDEX, |current, key| self.find_child(current, key))
    }
}

impl Default for NavTree<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Structural operations (pub)
// ============================================================================
impl<'a> NavTree<'a> {
    /// Attaches `child` as last child of `parent`.
    ///
    /// # Panics
    /// Panics if `child` already has a parent, is the root, or equals `parent`.
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        assert!(
            !self[child].has_parent(),
            "Node {child} ('{}') already has a parent",
            self[child].key()
        );
        assert_ne!(child, ROOT_INDEX, "Cannot attach the root as a child");
        assert_ne!(child, parent, "Cannot attach node {child} to itself");

        self.nodes[child].parent = Some(parent);
        self.nodes[parent]
            .children
            .get_or_insert_with(Vec::new)
            .push(child);
    }

    /// Detaches `child` from `parent`.
    ///
    /// `parent` keeps its (possibly now empty) children list.
    ///
    /// # Panics
    /// Panics if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        assert_eq!(
            self[child].parent(),
            Some(parent),
            "Node {child} ('{}') is not a child of node {parent}",
            self[child].key()
        );

        self.nodes[child].parent = None;
        if let Some(children) = self.nodes[parent].children.as_mut() {
            children.retain(|&c| c != child);
        }
    }

    /// Detaches all children of `index` and returns them in order.
    ///
    /// Afterwards the node has no children list at all (not an empty one),
    /// so it counts as a leaf again.
    ///
    /// # Returns
    /// The removed children, or `None` if the node never had any.
    pub fn remove_children(&mut self, index: NodeIndex) -> Option<Vec<NodeIndex>> {
        let children = self.nodes[index].children.take()?;
        for &child in &children {
            self.nodes[child].parent = None;
        }
        Some(children)
    }

    /// Returns the first child of `index` with exactly the given key.
    pub fn find_child(&self, index: NodeIndex, key: &str) -> Option<NodeIndex> {
        self[index]
            .children()?
            .iter()
            .copied()
            .find(|&c| self[c].key() == key)
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl NavTree<'_> {
    /// Validates the structure reachable from the root.
    ///
    /// Checks:
    /// - Root has no parent
    /// - Every child points back to its parent
    /// - No node is reachable twice
    /// - Sibling keys are unique
    /// - Every node without children has a value (root excepted)
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.root().has_parent() {
            return false;
        }

        let mut seen = HashSet::new();
        let mut stack = vec![ROOT_INDEX];
        while let Some(index) = stack.pop() {
            if !seen.insert(index) {
                return false;
            }

            let node = &self[index];
            if index != ROOT_INDEX && node.is_leaf() && !node.has_value() {
                return false;
            }

            let children = node.children().unwrap_or_default();
            let mut keys = HashSet::with_capacity(children.len());
            for &child in children {
                if child >= self.nodes.len() || self[child].parent() != Some(index) {
                    return false;
                }
                if !keys.insert(self[child].key()) {
                    return false;
                }
                stack.push(child);
            }
        }

        true
    }
}

impl<'a> std::ops::Index<NodeIndex> for NavTree<'a> {
    type Output = TreeNode<'a>;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<'a> std::ops::IndexMut<NodeIndex> for NavTree<'a> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl NavTree<'_> {
    /// Returns a visual representation of the tree below the root.
    ///
    /// # Example Output
    /// ```text
    /// ├─ a.b
    /// │  ├─ C -> a.b.C.html
    /// │  └─ D -> a.b.D.html
    /// └─ x -> x.html
    /// ```
    pub fn format_tree(&self) -> String {
        let mut out = String::new();
        self.format_children(&mut out, ROOT_INDEX, "");
        out
    }

    /// Helper function to recursively format the children of a node.
    fn format_children(&self, out: &mut String, index: NodeIndex, prefix: &str) {
        let children = self[index].children().unwrap_or_default();
        for (i, &child) in children.iter().enumerate() {
            let is_last = i + 1 == children.len();
            let connector = if is_last { "└─ " } else { "├─ " };
            let node = &self[child];

            let _ = write!(out, "{prefix}{connector}{}", node.key());
            if let Some(value) = node.value() {
                let _ = write!(out, " -> {}", value.href);
            }
            out.push('\n');

            let new_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
            self.format_children(out, child, &new_prefix);
        }
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
impl<'a> NavTree<'a> {
    /// Returns an iterator over the reachable nodes in pre-order
    /// (parents before children, siblings in order), root first.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, 'a> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the reachable nodes in post-order
    /// (children before parents, siblings in order), root last.
    pub fn post_order_iter(&self) -> PostOrderIter<'_, 'a> {
        PostOrderIter::new(self)
    }
}

/// Iterator for pre-order traversal, yielding `(index, node)` pairs.
pub struct PreOrderIter<'t, 'a> {
    tree: &'t NavTree<'a>,
    stack: Vec<NodeIndex>,
}

impl<'t, 'a> PreOrderIter<'t, 'a> {
    fn new(tree: &'t NavTree<'a>) -> Self {
        PreOrderIter {
            tree,
            stack: vec![ROOT_INDEX],
        }
    }
}

impl<'t, 'a> Iterator for PreOrderIter<'t, 'a> {
    type Item = (NodeIndex, &'t TreeNode<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];

        // Push children in reverse, so first child is processed first
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }

        Some((index, node))
    }
}

/// Iterator for post-order traversal, yielding `(index, node)` pairs.
pub struct PostOrderIter<'t, 'a> {
    tree: &'t NavTree<'a>,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'t, 'a> PostOrderIter<'t, 'a> {
    fn new(tree: &'t NavTree<'a>) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(ROOT_INDEX, false)],
        }
    }
}

impl<'t, 'a> Iterator for PostOrderIter<'t, 'a> {
    type Item = (NodeIndex, &'t TreeNode<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.is_leaf() {
                return Some((index, node));
            }

            self.stack.push((index, true));
            if let Some(children) = node.children() {
                self.stack
                    .extend(children.iter().rev().map(|&c| (c, false)));
            }
        }
        None
    }
}
