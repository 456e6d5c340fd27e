use super::token::Span;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexicalErrorKind {
    #[error("Unexpected character: {0}")]
    Unrecognized(char),
    #[error("Unterminated string")]
    UnclosedString,
    #[error("Unknown escape sequence: \\{0}")]
    UnknownEscape(char),
    #[error("Unknown annotation: {0}")]
    UnknownAnnotation(CompactString),
    #[error("Integer literal out of range")]
    IntegerOutOfRange,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Line {line}, Column {column}: {kind}")]
pub struct LexicalError {
    #[source]
    pub kind: LexicalErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}
