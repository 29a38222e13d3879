//! Resolution error definitions.

use auryl_syntax::{Span, SyntaxKind};
use auryl_tree::TreeError;
use smol_str::SmolStr;
use thiserror::Error;

/// An error while building the component tree from a syntax tree.
///
/// Any error aborts the file being resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("cannot find type `{name}`")]
    TypeNotFound { name: SmolStr, span: Option<Span> },

    #[error("cannot resolve `{path}`; it must name something declared before this point")]
    UnresolvedReference { path: SmolStr, span: Option<Span> },

    #[error("`{path}` is {found}, expected {expected}")]
    WrongReferenceKind {
        path: SmolStr,
        expected: &'static str,
        found: &'static str,
        span: Option<Span>,
    },

    #[error("cannot enter package `{name}`: it is {found}")]
    NotAPackage {
        name: SmolStr,
        found: &'static str,
        span: Option<Span>,
    },

    #[error("malformed `{kind}` node: missing {expected}")]
    Malformed {
        kind: SyntaxKind,
        expected: &'static str,
        span: Option<Span>,
    },

    /// The walker and the scope cursor disagree; a bug, not a user error.
    #[error("internal error: {message}")]
    Invariant { message: String, span: Option<Span> },

    #[error("{source}")]
    Tree {
        source: TreeError,
        span: Option<Span>,
    },
}

impl ResolveError {
    /// Get the span of this error, if known.
    pub fn span(&self) -> Option<Span> {
        match self {
            ResolveError::TypeNotFound { span, .. }
            | ResolveError::UnresolvedReference { span, .. }
            | ResolveError::WrongReferenceKind { span, .. }
            | ResolveError::NotAPackage { span, .. }
            | ResolveError::Malformed { span, .. }
            | ResolveError::Invariant { span, .. }
            | ResolveError::Tree { span, .. } => *span,
        }
    }

    /// Attach `at` as the location, unless a location is already known.
    pub fn with_span(mut self, at: Span) -> Self {
        match &mut self {
            ResolveError::TypeNotFound { span, .. }
            | ResolveError::UnresolvedReference { span, .. }
            | ResolveError::WrongReferenceKind { span, .. }
            | ResolveError::NotAPackage { span, .. }
            | ResolveError::Malformed { span, .. }
            | ResolveError::Invariant { span, .. }
            | ResolveError::Tree { span, .. } => {
                span.get_or_insert(at);
            }
        }
        self
    }

    /// Whether this error signals a bug rather than a problem in the source.
    pub fn is_internal(&self) -> bool {
        matches!(self, ResolveError::Invariant { .. })
    }
}

impl From<TreeError> for ResolveError {
    fn from(source: TreeError) -> Self {
        ResolveError::Tree { source, span: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_span_keeps_first_location() {
        let err = ResolveError::TypeNotFound {
            name: "bogus".into(),
            span: None,
        };
        let err = err.with_span(Span::new(3, 8)).with_span(Span::new(0, 20));
        assert_eq!(err.span(), Some(Span::new(3, 8)));
        assert_eq!(err.to_string(), "cannot find type `bogus`");
    }

    #[test]
    fn test_tree_errors_convert() {
        let err = ResolveError::from(TreeError::NameTaken {
            parent: "bar".into(),
            child: "foo".into(),
        });
        assert_eq!(err.span(), None);
        assert_eq!(
            err.to_string(),
            "`bar` already has a different child named `foo`"
        );
        assert!(!err.is_internal());
    }
}
