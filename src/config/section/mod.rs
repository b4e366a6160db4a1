//! Configuration section definitions.
//!
//! Each module corresponds to a section in `anchorlint.toml`:
//!
//! | Module   | TOML Section | Purpose                               |
//! |----------|--------------|---------------------------------------|
//! | `corpus` | `[corpus]`   | Corpus root, page extensions, exclude |
//! | `check`  | `[check]`    | Which checks run, failure level       |
//! | `index`  | `[index]`    | Rendered index markup                 |

mod check;
mod corpus;
mod index;

pub use check::{CheckConfig, ValidateLevel};
pub use corpus::CorpusConfig;
pub use index::IndexConfig;
