//! Token definitions for Auryl.

use logos::Logos;
use smol_str::SmolStr;

/// A token with its kind and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: std::ops::Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: std::ops::Range<usize>) -> Self {
        Self { kind, span }
    }
}

/// Token kinds for Auryl.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")] // Newlines carry no meaning in Auryl
pub enum TokenKind {
    // ========================================================================
    // Keywords
    // ========================================================================
    #[token("package")]
    Package,
    #[token("comp")]
    Comp,
    #[token("in")]
    In,
    #[token("out")]
    Out,
    #[token("data")]
    Data,
    #[token("run")]
    Run,
    #[token("on")]
    On,
    #[token("to")]
    To,

    // ========================================================================
    // Punctuation
    // ========================================================================
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,

    // ========================================================================
    // Delimiters
    // ========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // ========================================================================
    // Identifiers
    // ========================================================================
    /// Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| SmolStr::from(lex.slice()))]
    Ident(SmolStr),

    // ========================================================================
    // Comments
    // ========================================================================
    /// Single-line comment
    #[regex(r"//[^\n]*")]
    LineComment,

    /// Multi-line comment (handled specially)
    #[token("/*", |lex| skip_block_comment(lex))]
    BlockComment,

    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this token is trivia (comments, etc.)
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Text of this token when it appears as one segment of a dotted path.
    ///
    /// Keywords are valid segments so that references like `in.a` or
    /// `out.result` can name the fixed containers of a component.
    pub fn path_segment(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name.as_str()),
            TokenKind::Package => Some("package"),
            TokenKind::Comp => Some("comp"),
            TokenKind::In => Some("in"),
            TokenKind::Out => Some("out"),
            TokenKind::Data => Some("data"),
            TokenKind::Run => Some("run"),
            TokenKind::On => Some("on"),
            TokenKind::To => Some("to"),
            _ => None,
        }
    }
}

fn skip_block_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    let remainder = lex.remainder();
    let mut depth = 1;
    let mut chars = remainder.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '*' => {
                if let Some((_, '/')) = chars.clone().next() {
                    chars.next();
                    depth -= 1;
                    if depth == 0 {
                        lex.bump(i + 2);
                        return logos::Skip;
                    }
                }
            }
            '/' => {
                if let Some((_, '*')) = chars.clone().next() {
                    chars.next();
                    depth += 1;
                }
            }
            _ => {}
        }
    }

    // Unclosed comment - bump to end
    lex.bump(remainder.len());
    logos::Skip
}
