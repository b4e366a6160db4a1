//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`, `corpus_path`)
//! - [`route`]: Link helpers (`is_external_link`, `split_path_fragment`, `join_page_path`)

pub mod fs;
pub mod route;

pub use fs::{corpus_path, normalize_path, resolve_path};
