use crate::lexer::Span;
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::io::Cursor;

/// Renders a single error report with the offending span highlighted.
///
/// Falls back to the plain `message` when the report cannot be written.
pub fn render(path: &str, text: &str, span: Span, message: &str, label: &str) -> String {
    let mut output = Cursor::new(Vec::new());
    let written = Report::build(ReportKind::Error, (path, span.range()))
        .with_message(message)
        .with_label(
            Label::new((path, span.range()))
                .with_message(label)
                .with_color(Color::BrightRed),
        )
        .finish()
        .write((path, Source::from(text)), &mut output);

    match written {
        Ok(()) => String::from_utf8(output.into_inner()).unwrap_or_else(|_| message.into()),
        Err(_) => message.into(),
    }
}
