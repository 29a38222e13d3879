//! Recursive descent parser for Auryl.

use auryl_lexer::{Lexer, Token, TokenKind};
use auryl_syntax::{Span, SyntaxKind, SyntaxNode, SyntaxToken};

use crate::error::ParseError;

/// Parser for Auryl source code.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Token,
    previous: Token,
    errors: Vec<ParseError>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(source),
            current: Token::new(TokenKind::Eof, 0..0),
            previous: Token::new(TokenKind::Eof, 0..0),
            errors: Vec::new(),
        };
        parser.current = parser.next_token();
        parser
    }

    /// Get the collected errors.
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    fn next_token(&mut self) -> Token {
        loop {
            match self.lexer.next() {
                Some(Ok(token)) => return token,
                Some(Err(err)) => {
                    self.errors.push(ParseError::LexError { span: err.span() });
                }
                None => {
                    let end = self.previous.span.end.max(self.current.span.end);
                    return Token::new(TokenKind::Eof, end..end);
                }
            }
        }
    }

    fn advance(&mut self) {
        let next = self.next_token();
        self.previous = std::mem::replace(&mut self.current, next);
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn consume(&mut self, kind: TokenKind, expected: &str) -> bool {
        if self.check(&kind) {
            self.advance();
            true
        } else {
            self.error_expected(expected);
            false
        }
    }

    fn error_expected(&mut self, expected: &str) {
        let err = if self.at_end() {
            ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span: self.current.span.clone(),
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current.kind.clone(),
                span: self.current.span.clone(),
            }
        };
        self.errors.push(err);
    }

    fn span(&self, start: usize) -> Span {
        Span::from_range(start..self.previous.span.end)
    }

    /// Skip to the end of the current declaration.
    ///
    /// Stops after a `;`, or before a `}` so the enclosing block can close.
    fn synchronize(&mut self) {
        while !self.at_end() {
            match self.current.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace => return,
                _ => self.advance(),
            }
        }
    }

    // ========================================================================
    // Top-level parsing
    // ========================================================================

    /// Parse a complete source file.
    pub fn parse_file(&mut self) -> SyntaxNode {
        let start = self.current.span.start;
        let mut file = SyntaxNode::new(SyntaxKind::File, Span::default());

        if self.check(&TokenKind::Package) {
            if let Some(decl) = self.parse_package_decl() {
                file.push_node(decl);
            }
        }

        while !self.at_end() {
            match self.current.kind {
                TokenKind::Comp => {
                    if let Some(component) = self.parse_component() {
                        file.push_node(component);
                    }
                }
                TokenKind::Package => {
                    let span = self.current.span.clone();
                    self.errors.push(ParseError::MisplacedPackage { span });
                    self.synchronize();
                }
                _ => {
                    self.error_expected("`comp`");
                    // Error recovery: skip the offending token
                    self.advance();
                }
            }
        }

        file.span = self.span(start);
        file
    }

    fn parse_package_decl(&mut self) -> Option<SyntaxNode> {
        let start = self.current.span.start;
        self.advance(); // `package`

        let Some(path) = self.parse_dotted("package name") else {
            self.synchronize();
            return None;
        };
        if !self.consume(TokenKind::Semicolon, "`;`") {
            self.synchronize();
        }

        let mut decl = SyntaxNode::new(SyntaxKind::PackageDecl, Span::default());
        decl.push_token(path);
        decl.span = self.span(start);
        Some(decl)
    }

    // ========================================================================
    // Components
    // ========================================================================

    fn parse_component(&mut self) -> Option<SyntaxNode> {
        let start = self.current.span.start;
        self.advance(); // `comp`

        let Some(name) = self.parse_identifier() else {
            self.synchronize();
            return None;
        };
        let mut component = SyntaxNode::new(SyntaxKind::Component, Span::default());
        component.push_token(name);

        if !self.consume(TokenKind::LBrace, "`{`") {
            self.synchronize();
            return None;
        }

        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.current.kind {
                TokenKind::In => self.parse_decl_block(SyntaxKind::Input, &mut component),
                TokenKind::Out => self.parse_decl_block(SyntaxKind::Output, &mut component),
                TokenKind::Data => self.parse_decl_block(SyntaxKind::Datum, &mut component),
                TokenKind::Run => {
                    if let Some(runnables) = self.parse_runnables() {
                        component.push_node(runnables);
                    }
                }
                _ => {
                    self.error_expected("`in`, `out`, `data` or `run`");
                    self.synchronize();
                }
            }
        }

        self.consume(TokenKind::RBrace, "`}`");
        component.span = self.span(start);
        Some(component)
    }

    /// Parse `in { ... }`, `out { ... }` or `data { ... }`.
    ///
    /// Declarations are attached directly to the component node.
    fn parse_decl_block(&mut self, kind: SyntaxKind, component: &mut SyntaxNode) {
        self.advance(); // block keyword

        if !self.consume(TokenKind::LBrace, "`{`") {
            self.synchronize();
            return;
        }

        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.parse_decl(kind) {
                Some(decl) => component.push_node(decl),
                None => self.synchronize(),
            }
        }

        self.consume(TokenKind::RBrace, "`}`");
    }

    /// Parse `name: type;`.
    fn parse_decl(&mut self, kind: SyntaxKind) -> Option<SyntaxNode> {
        let start = self.current.span.start;
        let name = self.parse_identifier()?;
        if !self.consume(TokenKind::Colon, "`:`") {
            return None;
        }
        let ty = self.parse_dotted("type name")?;
        if !self.consume(TokenKind::Semicolon, "`;`") {
            return None;
        }

        let mut decl = SyntaxNode::new(kind, Span::default());
        decl.push_token(name);
        decl.push_token(ty);
        decl.span = self.span(start);
        Some(decl)
    }

    // ========================================================================
    // Runnables
    // ========================================================================

    fn parse_runnables(&mut self) -> Option<SyntaxNode> {
        let start = self.current.span.start;
        self.advance(); // `run`

        if !self.consume(TokenKind::LBrace, "`{`") {
            self.synchronize();
            return None;
        }

        let mut runnables = SyntaxNode::new(SyntaxKind::Runnables, Span::default());
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.parse_run() {
                Some(run) => runnables.push_node(run),
                None => self.synchronize(),
            }
        }

        self.consume(TokenKind::RBrace, "`}`");
        runnables.span = self.span(start);
        Some(runnables)
    }

    /// Parse `name;` or `name [on in.a; to out.b];`.
    fn parse_run(&mut self) -> Option<SyntaxNode> {
        let start = self.current.span.start;
        let name = self.parse_identifier()?;
        let mut run = SyntaxNode::new(SyntaxKind::Run, Span::default());
        run.push_token(name);

        if self.check(&TokenKind::LBracket) {
            self.advance();
            while !self.check(&TokenKind::RBracket) {
                run.push_node(self.parse_run_clause()?);

                if self.check(&TokenKind::Semicolon) {
                    self.advance();
                } else if !self.check(&TokenKind::RBracket) {
                    self.error_expected("`;` or `]`");
                    return None;
                }
            }
            self.advance(); // `]`
        }

        if !self.consume(TokenKind::Semicolon, "`;`") {
            return None;
        }
        run.span = self.span(start);
        Some(run)
    }

    fn parse_run_clause(&mut self) -> Option<SyntaxNode> {
        let start = self.current.span.start;
        let kind = match self.current.kind {
            TokenKind::On => SyntaxKind::RunTrigger,
            TokenKind::To => SyntaxKind::RunOutput,
            _ => {
                self.error_expected("`on` or `to`");
                return None;
            }
        };
        self.advance();

        let target = self.parse_dotted("reference")?;
        let mut clause = SyntaxNode::new(kind, Span::default());
        clause.push_token(target);
        clause.span = self.span(start);
        Some(clause)
    }

    // ========================================================================
    // Names
    // ========================================================================

    fn parse_identifier(&mut self) -> Option<SyntaxToken> {
        if let TokenKind::Ident(name) = &self.current.kind {
            let token = SyntaxToken::new(name.clone(), Span::from_range(self.current.span.clone()));
            self.advance();
            Some(token)
        } else {
            self.errors.push(ParseError::ExpectedIdent {
                found: self.current.kind.clone(),
                span: self.current.span.clone(),
            });
            None
        }
    }

    /// Parse `segment(.segment)*` into a single token whose text keeps the dots.
    fn parse_dotted(&mut self, expected: &str) -> Option<SyntaxToken> {
        let start = self.current.span.start;
        let mut text = String::new();

        loop {
            match self.current.kind.path_segment() {
                Some(segment) => text.push_str(segment),
                None => {
                    self.error_expected(expected);
                    return None;
                }
            }
            self.advance();

            if !self.check(&TokenKind::Dot) {
                break;
            }
            self.advance();
            text.push('.');
        }

        Some(SyntaxToken::new(text, self.span(start)))
    }
}
