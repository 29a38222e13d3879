//! Parser error definitions.

use auryl_lexer::TokenKind;
use thiserror::Error;

/// A parser error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        span: std::ops::Range<usize>,
    },

    #[error("unexpected end of file: expected {expected}")]
    UnexpectedEof {
        expected: String,
        span: std::ops::Range<usize>,
    },

    #[error("expected identifier, found {found:?}")]
    ExpectedIdent {
        found: TokenKind,
        span: std::ops::Range<usize>,
    },

    #[error("package declaration must be the first item in a file")]
    MisplacedPackage { span: std::ops::Range<usize> },

    #[error("unexpected character")]
    LexError { span: std::ops::Range<usize> },
}

impl ParseError {
    /// Get the span of this error.
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            ParseError::UnexpectedToken { span, .. } => span.clone(),
            ParseError::UnexpectedEof { span, .. } => span.clone(),
            ParseError::ExpectedIdent { span, .. } => span.clone(),
            ParseError::MisplacedPackage { span } => span.clone(),
            ParseError::LexError { span } => span.clone(),
        }
    }
}
