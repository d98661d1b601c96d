// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # fieldscope
//!
//! A thread-safe, memoizing field-introspection cache for structured type
//! descriptors.
//!
//! Given the structural description of a type, `fieldscope` walks it once,
//! builds an ordered tree of per-field nodes enriched with caller-supplied
//! metadata derived from declaration tags, and caches that tree keyed by type
//! identity - every later request for the same type is a single lock-free
//! map probe instead of a repeated structural analysis.
//!
//! ## Features
//!
//! - **Recursive introspection** - nested structures become nested trees,
//!   built bottom-up through the same memoized entry point
//! - **Tag-driven metadata** - a pluggable [`MetadataPolicy`] turns opaque
//!   per-field declaration tags into renamed, skipped or annotated fields
//! - **Self-referential graphs** - a field whose pointer-stripped type is its
//!   own enclosing type aliases the enclosing tree instead of recursing
//! - **Transparent containers** - sequences, maps and arrays introspect as
//!   their element type, sharing one tree
//! - **Concurrency-safe memoization** - lock-free reads, no lock held while
//!   building, racing builders converge on a single published tree
//!
//! ## Quick Start
//!
//! Describe types as `static` [`descriptor::TypeDescriptor`] values, pick a
//! policy, and ask the cache:
//!
//! ```rust
//! use fieldscope::prelude::*;
//!
//! static STRING: TypeDescriptor = TypeDescriptor::leaf("string");
//! static USER: TypeDescriptor = TypeDescriptor::structure(
//!     "User",
//!     &[
//!         FieldDescriptor::new(
//!             "Email",
//!             || &STRING,
//!             FieldFlags::PUBLIC,
//!             &[FieldTag::new("redact", "mask")],
//!         ),
//!         FieldDescriptor::new("DisplayName", || &STRING, FieldFlags::PUBLIC, &[]),
//!     ],
//! );
//!
//! /// Reads `redact:"..."` tags and marks tagged fields as sensitive.
//! struct Redaction;
//!
//! #[derive(Clone, Default, PartialEq, Debug)]
//! struct Sensitivity {
//!     masked: bool,
//! }
//!
//! impl MetadataPolicy for Redaction {
//!     type Metadata = Sensitivity;
//!
//!     fn tag_namespace(&self) -> &'static str {
//!         "redact"
//!     }
//!
//!     fn metadata(&self, _field: &FieldDescriptor, tag: &'static str) -> Option<Sensitivity> {
//!         Some(Sensitivity { masked: tag == "mask" })
//!     }
//! }
//!
//! let cache = TypeDataCache::new(Redaction);
//! let user = cache.type_data(&USER);
//!
//! let email = user.field_by_name("Email").unwrap();
//! assert!(email.metadata().masked);
//! assert!(!user.field_by_name("DisplayName").unwrap().metadata().masked);
//!
//! // The second request is a cache hit returning the identical tree.
//! assert!(std::sync::Arc::ptr_eq(&user, &cache.type_data(&USER)));
//! ```
//!
//! ## Architecture
//!
//! Two layers, leaf first:
//!
//! - [`descriptor`] - the statically constructible type-description surface
//!   the cache consumes; hand-written, macro-generated or emitted by a build
//!   step, the cache does not care
//! - [`typedata`] - the field-node tree, the policy contract and the
//!   memoizing cache itself
//!
//! There is no configuration, no I/O and no error surface: unsupported type
//! shapes degrade to empty nodes, and a field excluded by the policy is
//! indistinguishable from one that was never declared.

pub mod descriptor;
pub mod prelude;
pub mod typedata;

pub use typedata::{FieldData, FieldDataRc, FieldSet, MetadataPolicy, TypeDataCache};
