use crate::lexer::{Span, Token, TokenKind};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("{message}")]
    UnexpectedToken {
        expected: TokenKind,
        message: &'static str,
    },
    #[error("Expect expression")]
    ExpectedExpression,
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("Expected type name")]
    ExpectedTypeName,
    #[error("Expected context string (\"dev\", \"prod\", or \"test\")")]
    ExpectedContextString,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Line {line}, Column {column}: {kind} (got '{lexeme}')")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    /// Lexeme of the token the parser was looking at.
    pub lexeme: CompactString,
}

impl ParserError {
    pub fn at(kind: ParserErrorKind, token: &Token) -> Self {
        Self {
            kind,
            span: token.span,
            line: token.line,
            column: token.column,
            lexeme: token.lexeme.clone(),
        }
    }
}
