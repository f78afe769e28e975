//! # Repofind Locator
//!
//! Locates a named function's definition inside a source text and returns
//! its verbatim line span.
//!
//! The search is deliberately narrow: it looks at module-level definitions
//! and at definitions immediately inside a class-like scope (Python classes,
//! Rust impl/trait blocks, JS/TS classes). Functions nested inside other
//! functions or inside conditional blocks are never found.
//!
//! ```text
//! Source Text
//!     │
//!     ├──> Tree-sitter Parsing → Syntax Tree
//!     │
//!     ├──> Depth-first scoped search (first match in source order wins)
//!     │
//!     └──> FunctionMatch { start_line, end_line, text }
//! ```
//!
//! The returned text is a line slice of the original input, so formatting
//! and comments inside the span survive exactly as written.
//!
//! ## Example
//!
//! ```rust
//! use repofind_locator::{FunctionLocator, Language};
//!
//! let source = "def greet():\n    return \"hi\"\n";
//! let mut locator = FunctionLocator::new(Language::Python).unwrap();
//! let found = locator.find(source, "greet").unwrap().unwrap();
//! assert_eq!((found.start_line, found.end_line), (0, 2));
//! ```

mod error;
mod language;
mod locator;

pub use error::{LocatorError, Result};
pub use language::Language;
pub use locator::{find_function_definition, FunctionLocator, FunctionMatch};
