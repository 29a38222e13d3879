//! # Auryl Parser
//!
//! Parses Auryl source code into a raw labeled syntax tree.
//!
//! Uses recursive descent; errors are collected and the parser recovers at
//! the next `;` or `}` so one pass reports as many problems as possible.
//!
//! ## Example
//!
//! ```
//! use auryl_parser::parse;
//!
//! let source = r#"
//!     package bar.biz;
//!
//!     comp foo {
//!         in { a: int; }
//!         out { a: int; }
//!         run { process [on in.a; to out.a]; }
//!     }
//! "#;
//!
//! let result = parse(source);
//! assert!(result.errors.is_empty());
//! ```

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

use auryl_syntax::SyntaxNode;

/// Result of parsing.
pub struct ParseResult {
    /// The raw syntax tree (may be partial if errors occurred)
    pub tree: SyntaxNode,
    /// Any errors encountered during parsing
    pub errors: Vec<ParseError>,
}

/// Parse source code into a raw syntax tree.
pub fn parse(source: &str) -> ParseResult {
    let mut parser = Parser::new(source);
    let tree = parser.parse_file();
    ParseResult {
        tree,
        errors: parser.into_errors(),
    }
}
