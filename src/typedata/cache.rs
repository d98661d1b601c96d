//! The memoizing introspection cache.
//!
//! [`TypeDataCache`] walks a type's structural definition once, builds the
//! ordered tree of [`FieldData`] nodes enriched through the cache's
//! [`MetadataPolicy`], and memoizes the root keyed by normalized type
//! identity. Repeated requests for the same type are a single lock-free map
//! probe.
//!
//! # Build algorithm
//!
//! A miss branches on the normalized descriptor's [`TypeShape`]:
//!
//! - **Struct**: fields are visited in declaration order. A field that is
//!   neither public nor embedded is dropped; embedded fields are always
//!   considered, visibility notwithstanding. The policy can then exclude the
//!   field via [`MetadataPolicy::skip`] on its raw tag, or later by returning
//!   `None` from [`MetadataPolicy::metadata`]. Excluded fields leave no
//!   placeholder. Each surviving field's type is introspected through the
//!   same entry point (usually a cache hit) and its root is shallow-cloned so
//!   the copy can carry this field's position and metadata while sharing the
//!   cached child set. A field whose pointer-stripped type is the type under
//!   construction is not recursed into at all: its node aliases the set being
//!   built, which is how self-referential graphs terminate.
//! - **Sequence / Map / Array**: containers are transparent - the container's
//!   tree is exactly the element type's tree, the same `Arc`, also stored
//!   under the container's own key.
//! - **Pointer / Leaf**: degrade to a fresh empty node; nothing fails.
//!
//! # Thread Safety
//!
//! The memo table is a lock-free [`SkipMap`]; no lock is ever held across a
//! build. The probe-build-publish sequence is therefore not atomic, and two
//! threads missing on the same type may both run the full build. Builds are
//! deterministic pure functions of descriptor shape and policy, each produces
//! a fully formed tree before publishing, and `get_or_insert` hands every
//! racer the single entry that landed first - duplicate work is possible,
//! torn or divergent results are not. Published trees are immutable and
//! traversed without synchronization.
//!
//! # Examples
//!
//! ```rust
//! use fieldscope::prelude::*;
//!
//! static STRING: TypeDescriptor = TypeDescriptor::leaf("string");
//! static ACCOUNT: TypeDescriptor = TypeDescriptor::structure(
//!     "Account",
//!     &[
//!         FieldDescriptor::new(
//!             "Name",
//!             || &STRING,
//!             FieldFlags::PUBLIC,
//!             &[FieldTag::new("json", "name")],
//!         ),
//!         FieldDescriptor::new(
//!             "Secret",
//!             || &STRING,
//!             FieldFlags::PUBLIC,
//!             &[FieldTag::new("json", "-")],
//!         ),
//!     ],
//! );
//!
//! struct JsonNames;
//!
//! impl MetadataPolicy for JsonNames {
//!     type Metadata = ();
//!
//!     fn tag_namespace(&self) -> &'static str {
//!         "json"
//!     }
//!
//!     fn field_name(&self, tag: &'static str) -> Option<&'static str> {
//!         tag.split(',').next()
//!     }
//!
//!     fn skip(&self, tag: &str) -> bool {
//!         tag == "-"
//!     }
//! }
//!
//! let cache = TypeDataCache::new(JsonNames);
//! let account = cache.type_data(&ACCOUNT);
//! let fields = account.fields().unwrap();
//!
//! assert_eq!(fields.len(), 1);
//! assert!(fields.get("name").is_some());
//! assert!(fields.get("Secret").is_none());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crossbeam_skiplist::SkipMap;

use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeKey, TypeShape};
use crate::typedata::base::{Children, FieldData, FieldDataRc, FieldSet};
use crate::typedata::policy::MetadataPolicy;

/// Process-lifetime cache of introspected type trees.
///
/// Parameterized solely by the [`MetadataPolicy`] supplied at construction.
/// Trees are built lazily on first request, never evicted and never mutated
/// after publication; see the module docs for the build algorithm and the
/// concurrency discipline.
pub struct TypeDataCache<P: MetadataPolicy> {
    policy: P,
    types: SkipMap<TypeKey, FieldDataRc<P::Metadata>>,
}

impl<P: MetadataPolicy> TypeDataCache<P> {
    /// Creates an empty cache driven by `policy`.
    #[must_use]
    pub fn new(policy: P) -> Self {
        TypeDataCache {
            policy,
            types: SkipMap::new(),
        }
    }

    /// The policy this cache was constructed with.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Number of distinct type keys with a published tree.
    ///
    /// Containers alias their element's tree under a separate key, so this
    /// can exceed the number of distinct trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no tree has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the field tree for `descriptor`, building and memoizing it on
    /// first request.
    ///
    /// Pointer descriptors are normalized first, so `T` and `*T` share one
    /// tree. The result is always a well-formed node: unsupported and leaf
    /// shapes yield an empty node rather than an error.
    ///
    /// Termination relies on the direct self-reference rule; descriptor
    /// graphs containing an indirect cycle with no pointer-stripped
    /// self-reference (`A -> B -> A`) are outside the contract and will
    /// recurse without bound.
    #[must_use]
    pub fn type_data(&self, descriptor: &'static TypeDescriptor) -> FieldDataRc<P::Metadata> {
        let target = descriptor.normalized();
        let key = target.key();

        if let Some(entry) = self.types.get(&key) {
            return entry.value().clone();
        }

        let root = match target.shape {
            TypeShape::Struct { fields } => self.build_struct(target, fields),
            TypeShape::Sequence { element } | TypeShape::Array { element } => {
                self.type_data(element())
            }
            TypeShape::Map { value } => self.type_data(value()),
            // A pointer shape here means the original was a double pointer;
            // normalization strips exactly one level.
            TypeShape::Pointer { .. } | TypeShape::Leaf => Arc::new(FieldData::empty()),
        };

        self.types.get_or_insert(key, root).value().clone()
    }

    /// Builds the tree for a structured type.
    ///
    /// The child set is assembled inside [`Arc::new_cyclic`] so that a
    /// self-referential field can hold a back-reference to the very set that
    /// contains it.
    fn build_struct(
        &self,
        owner: &'static TypeDescriptor,
        fields: &'static [FieldDescriptor],
    ) -> FieldDataRc<P::Metadata> {
        let namespace = self.policy.tag_namespace();

        let set = Arc::new_cyclic(|own_set: &Weak<FieldSet<P::Metadata>>| {
            let mut nodes = Vec::new();
            let mut by_name = HashMap::new();

            for (index, field) in fields.iter().enumerate() {
                // Embedding is structural composition, not an access-control
                // boundary, so embedded fields bypass the visibility filter.
                if !field.is_public() && !field.is_embedded() {
                    continue;
                }

                let tag = field.tag(namespace);
                if self.policy.skip(tag) {
                    continue;
                }

                let name = match self.policy.field_name(tag) {
                    Some(resolved) if !resolved.is_empty() => resolved,
                    _ => field.name,
                };

                let field_type = field.descriptor();
                if std::ptr::eq(field_type.normalized(), owner) {
                    let node = Arc::new(FieldData {
                        index,
                        children: Children::BackRef(Weak::clone(own_set)),
                        metadata: P::Metadata::default(),
                    });
                    by_name.insert(name, Arc::clone(&node));
                    nodes.push(node);
                    continue;
                }

                let built = self.type_data(field_type);
                let Some(metadata) = self.policy.metadata(field, tag) else {
                    continue;
                };

                // Shallow clone: shares the cached child set, but the copy's
                // index and metadata belong to this parent field.
                let mut node = FieldData::clone(&built);
                node.index = index;
                node.metadata = metadata;
                let node = Arc::new(node);
                by_name.insert(name, Arc::clone(&node));
                nodes.push(node);
            }

            FieldSet::new(nodes, by_name)
        });

        Arc::new(FieldData {
            index: 0,
            children: Children::Owned(set),
            metadata: P::Metadata::default(),
        })
    }
}
