//! Node of a navigation tree.

use crate::model::descriptor::Descriptor;
use crate::model::tree::NodeIndex;

// =#========================================================================#=
// TREE NODE
// =#========================================================================#=
/// One path segment in the navigation hierarchy.
///
/// Nodes are stored in the arena of a [NavTree](crate::model::NavTree) and
/// reference each other by [NodeIndex]. Structural changes (attaching and
/// detaching children) go through the tree, so that parent and child links
/// stay consistent; the node itself only exposes its key and value for
/// modification.
///
/// # Invariants
/// - `parent` is `None` for the root and for detached nodes
/// - `children` is `None` until the first child is attached, and again
///   after [remove_children](crate::model::NavTree::remove_children)
/// - Sibling keys are unique
/// - After collapsing, a node without children has a value
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    /// Segment label; rewritten to `outer.inner` while collapsing
    key: String,

    /// The documented entity, if this node denotes one
    value: Option<&'a Descriptor>,

    /// Back-reference, not an ownership relation
    pub(crate) parent: Option<NodeIndex>,

    /// Ordered children; `None` distinguishes "never populated" from empty
    pub(crate) children: Option<Vec<NodeIndex>>,
}

impl<'a> TreeNode<'a> {
    /// Creates a detached node without children.
    ///
    /// # Arguments
    /// * `key` - Segment label
    /// * `value` - Descriptor of the entity this node denotes, if any
    pub fn new(key: impl Into<String>, value: Option<&'a Descriptor>) -> Self {
        TreeNode {
            key: key.into(),
            value,
            parent: None,
            children: None,
        }
    }

    /// Returns the segment label.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces the segment label.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Returns the descriptor this node denotes, if any.
    pub fn value(&self) -> Option<&'a Descriptor> {
        self.value
    }

    /// Replaces the descriptor.
    pub fn set_value(&mut self, value: Option<&'a Descriptor>) {
        self.value = value;
    }

    /// Returns `true` if this node denotes a documented entity.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the index of the parent, or `None` for roots and detached nodes.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns `true` if this node is attached to a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the children, or `None` if none were ever attached
    /// (or all were removed with `remove_children`).
    ///
    /// May return an empty slice after single children were removed.
    pub fn children(&self) -> Option<&[NodeIndex]> {
        self.children.as_deref()
    }

    /// Returns the number of children; absent children count as zero.
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }

    /// Returns the child at `position`, if any.
    pub fn child_at(&self, position: usize) -> Option<NodeIndex> {
        self.children.as_ref()?.get(position).copied()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }
}
