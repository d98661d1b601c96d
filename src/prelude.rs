//! # fieldscope Prelude
//!
//! Convenient single import for the types almost every use of the library
//! touches: the descriptor surface, the policy trait and the cache.

// ================================================================================================
// Descriptor Surface
// ================================================================================================

/// Structural type descriptions and field declarations
pub use crate::descriptor::{
    DescriptorFn, FieldDescriptor, FieldFlags, FieldTag, TypeDescriptor, TypeKey, TypeShape,
};

// ================================================================================================
// Introspection Core
// ================================================================================================

/// The memoizing cache and the trees it produces
pub use crate::typedata::{FieldData, FieldDataRc, FieldSet, TypeDataCache};

/// The caller-supplied metadata derivation contract
pub use crate::typedata::MetadataPolicy;
