use super::token::{Token, TokenKind};
use crate::diagnostic;
use crate::lexer::{LexicalError, LexicalErrorKind};

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

/// `KIND lexeme literal` per token, with `null` for tokens that carry no literal.
pub struct BasicFormatter;

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        let lexeme = token.lexeme.escape_debug();
        match token.literal {
            Some(ref literal) if token.kind == TokenKind::String => {
                format!("{} {lexeme} {}", token.kind, literal.to_string().escape_debug())
            }
            Some(ref literal) => format!("{} {lexeme} {literal}", token.kind),
            None => format!("{} {lexeme} null", token.kind),
        }
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        error.to_string()
    }
}

pub struct DebugFormatter;

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

/// Tokens with their positions, errors as source reports.
pub struct PrettyFormatter<'src> {
    path: &'src str,
    text: &'src str,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(path: &'src str, text: &'src str) -> Self {
        Self { path, text }
    }
}

impl<'src> TokenFormatter for PrettyFormatter<'src> {
    fn format(&self, token: &Token) -> String {
        format!(
            "{:>4}:{:<4} {}",
            token.line,
            token.column,
            BasicFormatter.format(token)
        )
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        let label = match error.kind {
            LexicalErrorKind::Unrecognized(_) => "Not a valid token",
            LexicalErrorKind::UnclosedString => "String starts here",
            LexicalErrorKind::UnknownEscape(_) => "In this string",
            LexicalErrorKind::UnknownAnnotation(_) => "Not a known annotation",
            LexicalErrorKind::IntegerOutOfRange => "Does not fit in 64 bits",
        };
        diagnostic::render(
            self.path,
            self.text,
            error.span,
            &error.kind.to_string(),
            label,
        )
    }
}
