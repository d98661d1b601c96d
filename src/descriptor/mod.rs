//! Structural type descriptors - the input surface of the introspection cache.
//!
//! Rust has no runtime field reflection, so the shape of a type is supplied to
//! [`crate::typedata::TypeDataCache`] as data: one `static` [`TypeDescriptor`]
//! per distinct type, classified by [`TypeShape`] and, for structured types,
//! carrying an ordered list of [`FieldDescriptor`] entries. Descriptors are
//! plain `const`-constructible values, so they can be written by hand, emitted
//! by a build-time generator, or produced by a macro - the cache does not care
//! where they come from.
//!
//! # Key Components
//!
//! - [`TypeDescriptor`] - a named type plus its structural classification
//! - [`TypeShape`] - struct / sequence / map / array / pointer / leaf
//! - [`FieldDescriptor`] - one declared field: name, type, flags, tags
//! - [`FieldFlags`] - visibility and embedding, stated by the descriptor
//!   rather than inferred from name casing
//! - [`FieldTag`] - an opaque per-namespace declaration tag
//! - [`TypeKey`] - the cache key derived from a descriptor's address
//!
//! # Identity and normalization
//!
//! A type's identity is the address of its `static` descriptor: define exactly
//! one `static TypeDescriptor` per distinct type and refer to it everywhere.
//! [`TypeDescriptor::normalized`] strips exactly one [`TypeShape::Pointer`]
//! level, so `T` and `*T` share one identity (and one cached tree), while a
//! double pointer normalizes to a single pointer and introspects as an opaque
//! leaf.
//!
//! # Cyclic definitions
//!
//! Field types are reached through a `fn() -> &'static TypeDescriptor` thunk
//! rather than a direct reference. The indirection is what lets a `static`
//! descriptor mention itself:
//!
//! ```rust
//! use fieldscope::descriptor::{FieldDescriptor, FieldFlags, TypeDescriptor};
//!
//! static NODE_PTR: TypeDescriptor = TypeDescriptor::pointer("*Node", || &NODE);
//! static NODE: TypeDescriptor = TypeDescriptor::structure(
//!     "Node",
//!     &[FieldDescriptor::new("Next", || &NODE_PTR, FieldFlags::PUBLIC, &[])],
//! );
//!
//! assert!(std::ptr::eq(NODE_PTR.normalized(), &NODE));
//! ```

use bitflags::bitflags;

/// Lazy reference to a type descriptor.
///
/// The thunk defers the borrow of the target `static` until introspection
/// time, which is what allows descriptor graphs to contain cycles.
pub type DescriptorFn = fn() -> &'static TypeDescriptor;

/// Structural classification of a described type.
///
/// Only [`TypeShape::Struct`] produces field nodes of its own. The three
/// container shapes are transparent: their tree is exactly the tree of the
/// element type. Everything that is neither structured nor a container is a
/// [`TypeShape::Leaf`] and introspects as an empty node.
#[derive(Clone, Copy, Debug)]
pub enum TypeShape {
    /// A record type with named, ordered fields.
    Struct {
        /// The fields in declaration order.
        fields: &'static [FieldDescriptor],
    },
    /// An ordered sequence (slice, vector, list) of one element type.
    Sequence {
        /// The element type.
        element: DescriptorFn,
    },
    /// An associative mapping; only the value type shapes the tree, keys are
    /// not modeled.
    Map {
        /// The value type.
        value: DescriptorFn,
    },
    /// A fixed-length array of one element type.
    Array {
        /// The element type.
        element: DescriptorFn,
    },
    /// One level of indirection to a target type.
    Pointer {
        /// The pointee type.
        target: DescriptorFn,
    },
    /// Any type without introspectable structure (primitives, opaque types).
    Leaf,
}

/// Cache key for a type, derived from the address of its `static` descriptor.
///
/// Keys compare equal exactly when two descriptor references point at the
/// same `static`, after pointer normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(usize);

/// A named type together with its structural classification.
///
/// Descriptors are immutable and expected to live in `static` items; see the
/// module docs for the identity contract.
#[derive(Clone, Copy, Debug)]
pub struct TypeDescriptor {
    /// Display name of the type, used for diagnostics only - identity is the
    /// descriptor's address, never its name.
    pub name: &'static str,
    /// The structural classification.
    pub shape: TypeShape,
}

impl TypeDescriptor {
    /// Describes a structured type with the given fields in declaration order.
    #[must_use]
    pub const fn structure(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        TypeDescriptor {
            name,
            shape: TypeShape::Struct { fields },
        }
    }

    /// Describes an ordered sequence of `element`.
    #[must_use]
    pub const fn sequence(name: &'static str, element: DescriptorFn) -> Self {
        TypeDescriptor {
            name,
            shape: TypeShape::Sequence { element },
        }
    }

    /// Describes an associative mapping with values of type `value`.
    #[must_use]
    pub const fn map(name: &'static str, value: DescriptorFn) -> Self {
        TypeDescriptor {
            name,
            shape: TypeShape::Map { value },
        }
    }

    /// Describes a fixed-length array of `element`.
    #[must_use]
    pub const fn array(name: &'static str, element: DescriptorFn) -> Self {
        TypeDescriptor {
            name,
            shape: TypeShape::Array { element },
        }
    }

    /// Describes one level of indirection to `target`.
    #[must_use]
    pub const fn pointer(name: &'static str, target: DescriptorFn) -> Self {
        TypeDescriptor {
            name,
            shape: TypeShape::Pointer { target },
        }
    }

    /// Describes a type without introspectable structure.
    #[must_use]
    pub const fn leaf(name: &'static str) -> Self {
        TypeDescriptor {
            name,
            shape: TypeShape::Leaf,
        }
    }

    /// Strips exactly one pointer level.
    ///
    /// `*T` normalizes to `T`; any other shape, including a double pointer's
    /// inner pointer, is returned unchanged.
    #[must_use]
    pub fn normalized(&'static self) -> &'static TypeDescriptor {
        match self.shape {
            TypeShape::Pointer { target } => target(),
            _ => self,
        }
    }

    /// The cache key for this descriptor.
    ///
    /// Derived from the descriptor's address; callers normalize first when
    /// pointer transparency is wanted.
    #[must_use]
    pub fn key(&'static self) -> TypeKey {
        TypeKey(std::ptr::from_ref(self) as usize)
    }
}

bitflags! {
    /// Per-field flags stated by the descriptor source.
    ///
    /// Visibility is explicit rather than derived from name casing, which
    /// keeps the descriptor contract independent of any source language's
    /// identifier conventions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FieldFlags: u8 {
        /// The field is visible outside its declaring scope. Fields that are
        /// neither `PUBLIC` nor `EMBEDDED` are excluded from introspection.
        const PUBLIC = 1 << 0;
        /// The field is an embedded / anonymous composition member. Embedded
        /// fields are always considered, regardless of visibility.
        const EMBEDDED = 1 << 1;
    }
}

/// An opaque declaration tag scoped to a namespace, e.g. `json:"name,opt"`
/// carried as `FieldTag::new("json", "name,opt")`.
///
/// Tag values have no grammar here; interpreting them is entirely the
/// business of the metadata policy that reads the matching namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldTag {
    /// The tag namespace, typically a format or policy name.
    pub namespace: &'static str,
    /// The raw tag string.
    pub value: &'static str,
}

impl FieldTag {
    /// Creates a tag entry.
    #[must_use]
    pub const fn new(namespace: &'static str, value: &'static str) -> Self {
        FieldTag { namespace, value }
    }
}

/// One declared field of a structured type.
#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor {
    /// The declared field name.
    pub name: &'static str,
    /// Lazy reference to the field's declared type, possibly pointer- or
    /// container-wrapped.
    pub descriptor: DescriptorFn,
    /// Visibility and embedding flags.
    pub flags: FieldFlags,
    /// Declaration tags, at most one per namespace.
    pub tags: &'static [FieldTag],
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    #[must_use]
    pub const fn new(
        name: &'static str,
        descriptor: DescriptorFn,
        flags: FieldFlags,
        tags: &'static [FieldTag],
    ) -> Self {
        FieldDescriptor {
            name,
            descriptor,
            flags,
            tags,
        }
    }

    /// Resolves the field's declared type descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }

    /// The raw tag value for `namespace`, or `""` when the field carries no
    /// tag in that namespace. A tag is an opaque string; absence and emptiness
    /// are deliberately indistinguishable.
    #[must_use]
    pub fn tag(&self, namespace: &str) -> &'static str {
        self.tags
            .iter()
            .find(|tag| tag.namespace == namespace)
            .map_or("", |tag| tag.value)
    }

    /// Whether the field is visible outside its declaring scope.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags.contains(FieldFlags::PUBLIC)
    }

    /// Whether the field is an embedded / anonymous composition member.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.flags.contains(FieldFlags::EMBEDDED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LEAF: TypeDescriptor = TypeDescriptor::leaf("string");
    static LEAF_PTR: TypeDescriptor = TypeDescriptor::pointer("*string", || &LEAF);
    static LEAF_PTR_PTR: TypeDescriptor = TypeDescriptor::pointer("**string", || &LEAF_PTR);

    #[test]
    fn normalization_strips_one_pointer_level() {
        assert!(std::ptr::eq(LEAF.normalized(), &LEAF));
        assert!(std::ptr::eq(LEAF_PTR.normalized(), &LEAF));
        assert!(std::ptr::eq(LEAF_PTR_PTR.normalized(), &LEAF_PTR));
    }

    #[test]
    fn keys_follow_normalization() {
        assert_eq!(LEAF.normalized().key(), LEAF_PTR.normalized().key());
        assert_ne!(LEAF.key(), LEAF_PTR.key());
    }

    #[test]
    fn tag_lookup_falls_back_to_empty() {
        static TAGS: [FieldTag; 2] = [
            FieldTag::new("json", "name,omitempty"),
            FieldTag::new("redact", "mask"),
        ];
        let field = FieldDescriptor::new("Name", || &LEAF, FieldFlags::PUBLIC, &TAGS);

        assert_eq!(field.tag("json"), "name,omitempty");
        assert_eq!(field.tag("redact"), "mask");
        assert_eq!(field.tag("xml"), "");
    }

    #[test]
    fn flags_classify_visibility_and_embedding() {
        let hidden = FieldDescriptor::new("secret", || &LEAF, FieldFlags::empty(), &[]);
        let embedded = FieldDescriptor::new("base", || &LEAF, FieldFlags::EMBEDDED, &[]);

        assert!(!hidden.is_public() && !hidden.is_embedded());
        assert!(!embedded.is_public() && embedded.is_embedded());
    }
}
