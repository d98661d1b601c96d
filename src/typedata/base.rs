//! Field node and child-set types produced by the cache.
//!
//! A [`FieldData`] describes one field of a structured type (or the type
//! itself, for a tree's root): its declaration position, its children when
//! the field's type is itself structured, and the policy-produced metadata
//! value. Nodes are assembled exclusively by
//! [`crate::typedata::TypeDataCache`] and are immutable once published; any
//! number of threads may traverse them without synchronization.
//!
//! Children are held in a shared [`FieldSet`], reachable both in declaration
//! order and by resolved name. For a directly self-referential field the node
//! does not own an independent set: it carries a weak back-reference to the
//! enclosing type's own set, so the recursion that would otherwise never
//! terminate is replaced by aliasing. The weak link also keeps the
//! set-contains-node-contains-set loop from becoming a strong `Arc` cycle.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Reference-counted handle to a field node.
pub type FieldDataRc<M> = Arc<FieldData<M>>;

/// How a node reaches its children, if it has any.
#[derive(Debug)]
pub(crate) enum Children<M> {
    /// Leaf type: no children.
    None,
    /// The node's type has its own tree.
    Owned(Arc<FieldSet<M>>),
    /// Direct self-reference: the enclosing type's own set, weakly held.
    BackRef(Weak<FieldSet<M>>),
}

impl<M> Clone for Children<M> {
    fn clone(&self) -> Self {
        match self {
            Children::None => Children::None,
            Children::Owned(set) => Children::Owned(Arc::clone(set)),
            Children::BackRef(set) => Children::BackRef(Weak::clone(set)),
        }
    }
}

/// The ordered, name-indexed children of one structured type.
///
/// Both views hold the same membership: every node in [`FieldSet::nodes`] is
/// reachable through [`FieldSet::get`] under its resolved name and vice
/// versa. Sets are frozen before publication and shared freely between the
/// trees that reference them.
#[derive(Debug)]
pub struct FieldSet<M> {
    nodes: Vec<FieldDataRc<M>>,
    by_name: HashMap<&'static str, FieldDataRc<M>>,
}

impl<M> FieldSet<M> {
    pub(crate) fn new(
        nodes: Vec<FieldDataRc<M>>,
        by_name: HashMap<&'static str, FieldDataRc<M>>,
    ) -> Self {
        FieldSet { nodes, by_name }
    }

    /// Number of included fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The nodes in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[FieldDataRc<M>] {
        &self.nodes
    }

    /// Looks up a node by its resolved field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldDataRc<M>> {
        self.by_name.get(name).cloned()
    }

    /// Iterates the nodes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDataRc<M>> {
        self.nodes.iter()
    }
}

impl<'a, M> IntoIterator for &'a FieldSet<M> {
    type Item = &'a FieldDataRc<M>;
    type IntoIter = std::slice::Iter<'a, FieldDataRc<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// One node of an introspected type tree.
///
/// Cloning is shallow: the clone shares the original's child set. The cache
/// relies on this when it grafts a cached type's root under a new parent
/// field with a different index and metadata.
#[derive(Clone, Debug)]
pub struct FieldData<M> {
    pub(crate) index: usize,
    pub(crate) children: Children<M>,
    pub(crate) metadata: M,
}

impl<M> FieldData<M> {
    /// A childless node with default metadata, as produced for leaf types and
    /// for tree roots of empty structures.
    pub(crate) fn empty() -> Self
    where
        M: Default,
    {
        FieldData {
            index: 0,
            children: Children::None,
            metadata: M::default(),
        }
    }

    /// The field's declaration position within its immediate parent, 0-based.
    ///
    /// Positions count declared fields, so excluded siblings leave gaps; a
    /// tree's root always reports `0`.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The policy-produced metadata value.
    ///
    /// Tree roots and self-referential fields carry the policy's default.
    #[must_use]
    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// The node's children, when its (pointer-stripped) type is structured.
    ///
    /// Returns `None` for leaf types. For a self-referential field this
    /// upgrades the back-reference and yields the enclosing type's own set,
    /// pointer-identical to the parent's; the upgrade only fails once the
    /// owning tree has been dropped, which cannot happen while the cache that
    /// built it is alive.
    #[must_use]
    pub fn fields(&self) -> Option<Arc<FieldSet<M>>> {
        match &self.children {
            Children::None => None,
            Children::Owned(set) => Some(Arc::clone(set)),
            Children::BackRef(set) => set.upgrade(),
        }
    }

    /// Looks up a child by its resolved field name.
    ///
    /// Absent names and childless nodes both yield `None`.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<FieldDataRc<M>> {
        self.fields().and_then(|set| set.get(name))
    }

    /// Number of included child fields; `0` for childless nodes.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields().map_or(0, |set| set.len())
    }
}
