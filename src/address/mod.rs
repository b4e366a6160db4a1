//! Corpus address space - every page, anchor and linkable file.
//!
//! # Relationship with [`LinkKind`](crate::core::LinkKind)
//!
//! - [`LinkKind`](crate::core::LinkKind): **Syntactic** classification (no context needed)
//! - [`AnchorRegistry::resolve_link`]: **Semantic** resolution (needs the whole corpus)
//!
//! # Module Structure
//!
//! - [`registry`]: `(page, id)` → anchor mapping with duplicate detection
//! - [`resolve`]: link resolution and report aggregation
//!
//! # Usage
//!
//! ```ignore
//! let (registry, duplicates) = AnchorRegistry::build(&pages);
//! let report = resolve(pages.iter().flat_map(|p| &p.links), &registry, ResolveOptions::default());
//! ```

mod registry;
mod resolve;

pub use registry::{AnchorRegistry, DuplicateAnchor};
pub use resolve::{ResolveOptions, resolve};
