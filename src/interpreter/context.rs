use super::SystemContext;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Console I/O through the process's stdin and stdout.
pub struct StdioContext;

impl SystemContext for StdioContext {
    fn write(&mut self, text: &str) {
        if let Err(error) = emit(&mut std::io::stdout().lock(), text, false) {
            tracing::warn!(%error, "failed to write to stdout");
        }
    }

    fn writeln(&mut self, text: &str) {
        if let Err(error) = emit(&mut std::io::stdout().lock(), text, true) {
            tracing::warn!(%error, "failed to write to stdout");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches('\n').trim_end_matches('\r');
                Some(trimmed.to_string())
            }
        }
    }
}

fn emit(out: &mut impl Write, text: &str, newline: bool) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    if newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Captures output and serves scripted input lines.
#[derive(Debug, Default)]
pub struct BufferedContext {
    buffer: String,
    input: VecDeque<String>,
}

impl BufferedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buffer: String::new(),
            input: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn data(&self) -> &str {
        &self.buffer
    }

    pub fn into_data(self) -> String {
        self.buffer
    }
}

impl SystemContext for BufferedContext {
    fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn writeln(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }
}
