//! The caller-supplied rule set that drives metadata derivation.

use crate::descriptor::FieldDescriptor;

/// Derives per-field metadata from declaration tags during tree construction.
///
/// One policy is fixed per [`crate::typedata::TypeDataCache`] instance, and
/// its [`MetadataPolicy::Metadata`] associated type is the one metadata shape
/// every node of every tree built by that cache carries.
///
/// # Contract
///
/// All four operations must be deterministic and side-effect-free: the cache
/// invokes them only while building a tree, never on a cache hit, and
/// concurrent misses on the same type may run duplicate builds whose results
/// must be interchangeable. A policy that violates determinism makes which of
/// the racing trees gets published observable; that is the implementer's
/// problem, not the cache's.
///
/// Tag values are opaque strings taken verbatim from the field descriptor;
/// a field with no tag in the policy's namespace is presented as `""`.
pub trait MetadataPolicy {
    /// The per-field metadata value attached to every node.
    ///
    /// `Default` doubles as the value for tree roots and self-referential
    /// fields, where the policy is never consulted. The `Send + Sync` bounds
    /// let finished trees be shared across threads.
    type Metadata: Clone + Default + Send + Sync + 'static;

    /// The declaration-tag namespace this policy reads, e.g. `"json"`.
    fn tag_namespace(&self) -> &'static str;

    /// An override display name for a field given its raw tag.
    ///
    /// `None` (or an empty override) means "use the declared field name".
    /// The returned slice is typically carved out of the tag itself.
    fn field_name(&self, tag: &'static str) -> Option<&'static str> {
        let _ = tag;
        None
    }

    /// Whether the field must be excluded from the tree entirely.
    ///
    /// The raw tag is passed through so skip decisions can depend on tag
    /// content, e.g. treating `"-"` as "never include".
    fn skip(&self, tag: &str) -> bool {
        let _ = tag;
        false
    }

    /// Constructs the metadata value for one field.
    ///
    /// `None` excludes the field, exactly as if [`MetadataPolicy::skip`] had
    /// returned true. "No opinion" is expressed by returning
    /// `Some(Metadata::default())`, which is attached as-is; that is also
    /// what the provided default body does.
    fn metadata(&self, field: &FieldDescriptor, tag: &'static str) -> Option<Self::Metadata> {
        let _ = (field, tag);
        Some(Self::Metadata::default())
    }
}
