mod error;
mod expression;
pub mod formatter;
mod statement;

use crate::ast::{Expression, Program, Statement};
use crate::lexer::{Span, Token, TokenKind};
use compact_str::CompactString;
pub use error::{ParserError, ParserErrorKind};

/// Parses a token stream into a program and returns it with every diagnostic recorded.
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<ParserError>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    (program, parser.into_errors())
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    eof: Token,
    errors: Vec<ParserError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token {
                kind: TokenKind::Eof,
                lexeme: CompactString::default(),
                literal: None,
                span: Span::new(last.span.end(), last.span.end()),
                line: last.line,
                column: last.column,
            },
            None => Token {
                kind: TokenKind::Eof,
                lexeme: CompactString::default(),
                literal: None,
                span: Span::default(),
                line: 1,
                column: 1,
            },
        };
        Self {
            tokens,
            current: 0,
            eof,
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParserError> {
        self.errors
    }

    /// The diagnostics rendered as `Line L, Column C: message (got 'lexeme')`.
    pub fn diagnostics(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            if let Some(statement) = self.declaration_or_recover() {
                statements.push(statement);
            }
        }
        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Program::new(statements)
    }

    /// Parses a single declaration or statement, recovering on failure.
    pub fn parse_statement(&mut self) -> Option<Statement> {
        self.skip_newlines();
        if self.is_at_end() {
            return None;
        }
        self.declaration_or_recover()
    }

    /// Parses a single expression. A failure is recorded and yields `None`.
    pub fn parse_expression(&mut self) -> Option<Expression> {
        match self.expression() {
            Ok(expression) => Some(expression),
            Err(error) => {
                self.errors.push(error);
                None
            }
        }
    }
}

// Cursor
impl Parser {
    fn peek(&self, offset: usize) -> &Token {
        self.tokens.get(self.current + offset).unwrap_or(&self.eof)
    }

    fn previous(&self) -> &Token {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&self.eof)
    }

    fn is_at_end(&self) -> bool {
        self.peek(0).kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous().clone()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek(0).kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn eat_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|&kind| self.eat(kind))
    }

    /// Takes the expected token. On a mismatch the diagnostic is recorded and the current token is
    /// returned without advancing.
    fn consume(&mut self, expected: TokenKind, message: &'static str) -> Token {
        if let Some(token) = self.eat(expected) {
            return token;
        }
        self.report(ParserErrorKind::UnexpectedToken { expected, message });
        self.peek(0).clone()
    }

    fn report(&mut self, kind: ParserErrorKind) {
        let error = ParserError::at(kind, self.peek(0));
        tracing::debug!(%error, "parser error");
        self.errors.push(error);
    }

    fn error_here(&self, kind: ParserErrorKind) -> ParserError {
        ParserError::at(kind, self.peek(0))
    }

    fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline).is_some() {}
    }

    /// Discards tokens until just past a `;` or before a token that starts a declaration.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                break;
            }
            if self.peek(0).kind.starts_declaration() {
                break;
            }
            self.advance();
        }
        tracing::debug!(
            line = self.peek(0).line,
            column = self.peek(0).column,
            "synchronized"
        );
    }

    fn declaration_or_recover(&mut self) -> Option<Statement> {
        match self.declaration() {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.errors.push(error);
                self.synchronize();
                None
            }
        }
    }
}
