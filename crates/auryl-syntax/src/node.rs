//! Labeled syntax nodes.

use std::fmt;

use crate::Span;
use smol_str::SmolStr;

/// The grammar rule a [`SyntaxNode`] was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SyntaxKind {
    /// A whole source file.
    File,
    /// `package a.b.c;`
    PackageDecl,
    /// `comp Name { ... }`
    Component,
    /// `name: type;` inside an `in { ... }` block
    Input,
    /// `name: type;` inside an `out { ... }` block
    Output,
    /// `name: type;` inside a `data { ... }` block
    Datum,
    /// `run { ... }`
    Runnables,
    /// `name [on ...; to ...];` inside a `run { ... }` block
    Run,
    /// `on in.a`
    RunTrigger,
    /// `to out.a`
    RunOutput,
}

impl SyntaxKind {
    /// The grammar label of this kind.
    pub fn label(self) -> &'static str {
        match self {
            SyntaxKind::File => "file",
            SyntaxKind::PackageDecl => "package_decl",
            SyntaxKind::Component => "component",
            SyntaxKind::Input => "input",
            SyntaxKind::Output => "output",
            SyntaxKind::Datum => "datum",
            SyntaxKind::Runnables => "runnables",
            SyntaxKind::Run => "run",
            SyntaxKind::RunTrigger => "run_trigger",
            SyntaxKind::RunOutput => "run_output",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A plain text leaf: an identifier, a dotted path or a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxToken {
    pub text: SmolStr,
    pub span: Span,
}

impl SyntaxToken {
    pub fn new(text: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// The dot-separated segments of this token's text.
    pub fn segments(&self) -> Vec<SmolStr> {
        self.text.split('.').map(SmolStr::from).collect()
    }
}

/// A child of a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

/// A node of the raw syntax tree.
///
/// Children keep source order and mix nested nodes with text tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub children: Vec<SyntaxElement>,
    pub span: Span,
}

impl SyntaxNode {
    /// Create a node without children.
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self {
            kind,
            children: Vec::new(),
            span,
        }
    }

    /// Append a nested node.
    pub fn push_node(&mut self, node: SyntaxNode) {
        self.children.push(SyntaxElement::Node(node));
    }

    /// Append a text token.
    pub fn push_token(&mut self, token: SyntaxToken) {
        self.children.push(SyntaxElement::Token(token));
    }

    /// Builder-style [`SyntaxNode::push_node`].
    pub fn with_node(mut self, node: SyntaxNode) -> Self {
        self.push_node(node);
        self
    }

    /// Builder-style [`SyntaxNode::push_token`].
    pub fn with_token(mut self, text: impl Into<SmolStr>, span: Span) -> Self {
        self.push_token(SyntaxToken::new(text, span));
        self
    }

    /// Nested nodes, in source order.
    pub fn nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|child| match child {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        })
    }

    /// Text tokens, in source order.
    pub fn tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(|child| match child {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        })
    }

    /// The `index`-th text token, skipping nested nodes.
    pub fn token(&self, index: usize) -> Option<&SyntaxToken> {
        self.tokens().nth(index)
    }

    /// Render the tree with one node or token per line.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(self.kind.label());
        out.push('\n');
        for child in &self.children {
            match child {
                SyntaxElement::Node(node) => node.write_pretty(out, depth + 1),
                SyntaxElement::Token(token) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(&token.text);
                    out.push('\n');
                }
            }
        }
    }
}
