use super::{ParserError, ParserErrorKind};
use crate::ast::{Program, SExpressionFormatter};
use crate::diagnostic;

pub trait ProgramFormatter {
    fn format(&self, program: &Program) -> String;
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugProgramFormatter;

impl ProgramFormatter for DebugProgramFormatter {
    fn format(&self, program: &Program) -> String {
        format!("{program:#?}")
    }

    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

/// One S-expression per top-level statement, errors as plain diagnostics.
pub struct SExpressionProgramFormatter;

impl ProgramFormatter for SExpressionProgramFormatter {
    fn format(&self, program: &Program) -> String {
        SExpressionFormatter.format_program(program)
    }

    fn format_error(&self, error: &ParserError) -> String {
        error.to_string()
    }
}

pub struct PrettyProgramFormatter<'src> {
    path: &'src str,
    text: &'src str,
}

impl<'src> PrettyProgramFormatter<'src> {
    pub fn new(path: &'src str, text: &'src str) -> Self {
        Self { path, text }
    }
}

impl<'src> ProgramFormatter for PrettyProgramFormatter<'src> {
    fn format(&self, program: &Program) -> String {
        SExpressionFormatter.format_program(program)
    }

    fn format_error(&self, error: &ParserError) -> String {
        let label = match error.kind {
            ParserErrorKind::UnexpectedToken { expected, .. } => {
                format!("Expected {expected} here")
            }
            ParserErrorKind::ExpectedExpression => "Not the start of an expression".into(),
            ParserErrorKind::InvalidAssignmentTarget => "Cannot assign to this".into(),
            ParserErrorKind::ExpectedTypeName => "Expected an identifier".into(),
            ParserErrorKind::ExpectedContextString => "Expected a string literal".into(),
        };
        diagnostic::render(
            self.path,
            self.text,
            error.span,
            &error.kind.to_string(),
            &label,
        )
    }
}
