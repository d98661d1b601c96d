//! Memoized per-type field trees.
//!
//! This module is the heart of the crate: the recursive introspection
//! algorithm and the concurrency-safe memoization layer around it, together
//! with the node types the algorithm produces and the policy contract that
//! drives it.
//!
//! # Key Components
//!
//! - [`TypeDataCache`] - the memoizing cache; `type_data` is its single
//!   public operation
//! - [`FieldData`] / [`FieldSet`] - the immutable tree a type introspects to
//! - [`MetadataPolicy`] - the caller-supplied, side-effect-free rule set for
//!   tag namespace, field naming, skipping and metadata derivation
//!
//! See [`cache`] for the build algorithm and the threading discipline.

pub mod base;
pub mod cache;
pub mod policy;

pub use base::{FieldData, FieldDataRc, FieldSet};
pub use cache::TypeDataCache;
pub use policy::MetadataPolicy;
