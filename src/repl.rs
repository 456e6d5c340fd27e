use color_eyre::eyre::Result;
use myndra::interpreter::context::StdioContext;
use myndra::Interpreter;
use rustyline::{error::ReadlineError, DefaultEditor};

const PROMPT: &str = "myndra> ";

/// Reads lines until `exit`, `quit` or end of input. Each line runs as a program against one
/// long-lived interpreter, so bindings carry over between lines.
pub fn run() -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut interpreter = Interpreter::new(StdioContext);

    println!("Myndra REPL. Type 'exit' or 'quit' to leave.");
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }
        editor.add_history_entry(input)?;

        evaluate_line(&mut interpreter, input);
    }

    Ok(())
}

fn evaluate_line(interpreter: &mut Interpreter<StdioContext>, input: &str) {
    let (tokens, lexical_errors) = myndra::tokenize(input);
    let (program, parser_errors) = myndra::parse(tokens);
    if !lexical_errors.is_empty() || !parser_errors.is_empty() {
        for error in lexical_errors.iter() {
            eprintln!("{error}");
        }
        for error in parser_errors.iter() {
            eprintln!("{error}");
        }
        return;
    }

    tracing::debug!(statements = program.statements.len(), "evaluating line");
    if let Err(error) = interpreter.execute(&program) {
        eprintln!("Runtime error: {error}");
    }
}
