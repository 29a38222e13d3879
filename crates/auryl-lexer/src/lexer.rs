//! Token stream over Auryl source.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use logos::{Logos, SpannedIter};

/// Significant tokens of a source file, ending with one `Eof`.
///
/// Comments are dropped here; consumers never see trivia.
pub struct Lexer<'source> {
    tokens: SpannedIter<'source, TokenKind>,
    eof: Option<usize>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: TokenKind::lexer(source).spanned(),
            eof: Some(source.len()),
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (kind, span) in self.tokens.by_ref() {
            match kind {
                Ok(kind) if kind.is_trivia() => {}
                Ok(kind) => return Some(Ok(Token::new(kind, span))),
                Err(()) => return Some(Err(LexError::UnexpectedChar { span })),
            }
        }
        let end = self.eof.take()?;
        Some(Ok(Token::new(TokenKind::Eof, end..end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smol_str::SmolStr;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .filter_map(|r| r.ok())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_package_declaration() {
        let tokens: Vec<_> = Lexer::new("package bar.biz;")
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tokens.len(), 6); // package, bar, ., biz, ;, EOF
        assert_eq!(tokens[0].kind, TokenKind::Package);
        assert_eq!(tokens[1].kind, TokenKind::Ident(SmolStr::from("bar")));
        assert_eq!(tokens[1].span, 8..11);
        assert_eq!(tokens[2].kind, TokenKind::Dot);
        assert_eq!(tokens[3].kind, TokenKind::Ident(SmolStr::from("biz")));
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
    }

    #[test]
    fn test_component_with_runnable() {
        let source = r#"
            comp foo {
                in { a: int; }
                run { process [on in.a; to out.a]; }
            }
        "#;
        let kinds = kinds(source);

        assert_eq!(kinds[0], TokenKind::Comp);
        assert_eq!(kinds[1], TokenKind::Ident(SmolStr::from("foo")));
        assert_eq!(kinds[2], TokenKind::LBrace);
        assert_eq!(kinds[3], TokenKind::In);
        assert_eq!(kinds[4], TokenKind::LBrace);
        assert_eq!(kinds[5], TokenKind::Ident(SmolStr::from("a")));
        assert_eq!(kinds[6], TokenKind::Colon);
        assert_eq!(kinds[7], TokenKind::Ident(SmolStr::from("int")));
        assert_eq!(kinds[8], TokenKind::Semicolon);
        assert_eq!(kinds[9], TokenKind::RBrace);
        assert_eq!(kinds[10], TokenKind::Run);
        assert_eq!(kinds[11], TokenKind::LBrace);
        assert_eq!(kinds[12], TokenKind::Ident(SmolStr::from("process")));
        assert_eq!(kinds[13], TokenKind::LBracket);
        assert_eq!(kinds[14], TokenKind::On);
        assert_eq!(kinds[15], TokenKind::In);
        assert_eq!(kinds[16], TokenKind::Dot);
        assert_eq!(kinds[17], TokenKind::Ident(SmolStr::from("a")));
        assert_eq!(kinds[18], TokenKind::Semicolon);
        assert_eq!(kinds[19], TokenKind::To);
        assert_eq!(kinds[20], TokenKind::Out);
    }

    #[test]
    fn test_comments_skipped() {
        let source = r#"
            // This is a comment
            comp foo // inline comment
            /* block
               /* nested */
               comment */
            {}
        "#;
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Comp,
                TokenKind::Ident(SmolStr::from("foo")),
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let results: Vec<_> = Lexer::new("comp $ foo").collect();

        assert_eq!(results.len(), 4); // comp, error, foo, EOF
        assert_eq!(
            results[1],
            Err(LexError::UnexpectedChar { span: 5..6 })
        );
        assert_eq!(
            results[2],
            Ok(Token::new(TokenKind::Ident(SmolStr::from("foo")), 7..10))
        );
    }

    #[test]
    fn test_eof_once_at_source_end() {
        let mut lexer = Lexer::new("comp  // trailing\n");
        assert_eq!(lexer.next(), Some(Ok(Token::new(TokenKind::Comp, 0..4))));
        assert_eq!(lexer.next(), Some(Ok(Token::new(TokenKind::Eof, 18..18))));
        assert_eq!(lexer.next(), None);
    }
}
