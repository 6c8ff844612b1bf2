//! `literate_core` is the core library for the literate extractor. It finds
//! named, versioned code blocks in prose documents and renders one output file
//! per template and version, or writes an HTML history of how each block
//! changes between versions.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown document(s)
//!   → Lexer (tokenizes `{lang='…' name='…' template='…' ver='…'}` lines)
//!   → Parser (collects indented bodies, filters and dedents them into CodeBlocks)
//!   → Deduplicator (first (name, template, version) wins)
//!   → Engine (walks every version from min to max, binds blocks into template namespaces, renders)
//!   → or Diff (pairs adjacent versions of each name into an HTML report)
//! ```
//!
//! ## Declarations
//!
//! ```markdown
//! {lang='ruby' name='greeting' template='app' ver='1'}
//!     puts "hello"
//! ```
//!
//! The block above binds `greeting` in the namespace of template `app` at
//! version 1. A template `templates/app.rb.jinja` containing `{{ greeting }}`
//! renders to `templates/app-1.rb`.
//!
//! ## Modules
//!
//! - [`config`]: `literate.toml` / `.literaterc` discovery and loading.
//! - [`filter`]: exclusion patterns applied to body lines.
//! - [`template`]: template file lookup and output naming.
//! - [`namespace`]: per-template bindings and the template renderer.
//! - [`diff`]: the version history report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use literate_core::LiterateConfig;
//! use literate_core::extract_and_render;
//!
//! let config = LiterateConfig::discover(Path::new("."))
//!     .unwrap()
//!     .unwrap_or_default();
//! let result = extract_and_render(&["book.md"], Path::new("templates"), &config).unwrap();
//! for file in &result.written {
//!     println!("{}", file.path.display());
//! }
//! ```

pub use block::*;
pub use config::*;
pub use diagnostic::*;
pub use document::*;
pub use engine::*;
pub use error::*;
pub use parser::*;

mod block;
pub mod config;
mod diagnostic;
pub mod diff;
mod document;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod filter;
pub(crate) mod lexer;
pub mod namespace;
mod parser;
pub mod template;

#[cfg(test)]
mod __fixtures;
