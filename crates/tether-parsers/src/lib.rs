//! Parsing front end for tether.
//!
//! - [`treesitter`] — tree-sitter TypeScript/TSX parsing and language detection
//! - [`typescript`] — type registry building and HTTP call-site extraction
//! - [`contract`] — flattening a Postman collection into contract endpoints
//! - [`walker`] — source discovery and loading (`.gitignore`/`.tetherignore` aware)

pub mod contract;
pub mod queries;
pub mod treesitter;
pub mod typescript;
pub mod walker;
