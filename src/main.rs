mod repl;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use myndra::interpreter::context::StdioContext;
use myndra::Interpreter;
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};

/// Exit status for malformed input (sysexits `EX_DATAERR`).
const EXIT_DATA_ERROR: u8 = 65;
/// Exit status for runtime failures (sysexits `EX_SOFTWARE`).
const EXIT_SOFTWARE: u8 = 70;

#[derive(Debug, Parser)]
#[clap(name = "myndra", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: MyndraCommand,
}

#[derive(Debug, Subcommand)]
pub enum MyndraCommand {
    /// Print the token stream of a source file.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Print the syntax tree of a source file.
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: ProgramFormat,
    },
    /// Execute a source file.
    Run { path: PathBuf },
    /// Start an interactive session.
    Repl,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
    Pretty,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProgramFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("MYNDRA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let args = CLArgs::parse();
    let succeeded = match args.routine {
        MyndraCommand::Tokenize { path, format } => {
            let src = read_to_string(&path)?;
            tokenize(&path, &src, &format)
        }
        MyndraCommand::Parse { path, format } => {
            let src = read_to_string(&path)?;
            parse(&path, &src, &format)
        }
        MyndraCommand::Run { path } => {
            let src = read_to_string(&path)?;
            return Ok(run(&path, &src));
        }
        MyndraCommand::Repl => {
            repl::run()?;
            true
        }
    };

    if succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DATA_ERROR))
    }
}

fn tokenize(path: &Path, src: &str, format: &TokenFormat) -> bool {
    use myndra::lexer::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, TokenFormatter,
    };
    use myndra::lexer::Lexer;

    tracing::info!(?path, "tokenizing");
    let path = path.to_string_lossy();
    let formatter: Box<dyn TokenFormatter + '_> = match format {
        TokenFormat::Debug => Box::new(DebugFormatter),
        TokenFormat::Basic => Box::new(BasicFormatter),
        TokenFormat::Pretty => Box::new(PrettyFormatter::new(&path, src)),
    };

    let mut lexer = Lexer::new(src);
    for token in lexer.tokenize() {
        println!("{}", formatter.format(&token));
    }
    for error in lexer.errors() {
        eprintln!("{}", formatter.format_lexical_error(error));
    }
    !lexer.has_errors()
}

/// Lexes and parses `src`, printing every diagnostic as a source report.
fn front_end(path: &Path, src: &str) -> Option<myndra::ast::Program> {
    use myndra::lexer::formatter::{PrettyFormatter, TokenFormatter};
    use myndra::parser::formatter::{PrettyProgramFormatter, ProgramFormatter};

    let path = path.to_string_lossy();
    let (tokens, lexical_errors) = myndra::tokenize(src);
    let token_formatter = PrettyFormatter::new(&path, src);
    for error in lexical_errors.iter() {
        eprint!("{}", token_formatter.format_lexical_error(error));
    }

    let (program, parser_errors) = myndra::parse(tokens);
    let program_formatter = PrettyProgramFormatter::new(&path, src);
    for error in parser_errors.iter() {
        eprint!("{}", program_formatter.format_error(error));
    }

    (lexical_errors.is_empty() && parser_errors.is_empty()).then_some(program)
}

fn parse(path: &Path, src: &str, format: &ProgramFormat) -> bool {
    use myndra::parser::formatter::{
        DebugProgramFormatter, ProgramFormatter, SExpressionProgramFormatter,
    };

    tracing::info!(?path, "parsing");
    let formatter: Box<dyn ProgramFormatter> = match format {
        ProgramFormat::Debug => Box::new(DebugProgramFormatter),
        ProgramFormat::SExpr => Box::new(SExpressionProgramFormatter),
    };

    let (tokens, lexical_errors) = myndra::tokenize(src);
    for error in lexical_errors.iter() {
        eprintln!("{error}");
    }
    let (program, parser_errors) = myndra::parse(tokens);
    for error in parser_errors.iter() {
        eprintln!("{}", formatter.format_error(error));
    }
    println!("{}", formatter.format(&program));

    lexical_errors.is_empty() && parser_errors.is_empty()
}

fn run(path: &Path, src: &str) -> ExitCode {
    tracing::info!(?path, "running");
    let Some(program) = front_end(path, src) else {
        return ExitCode::from(EXIT_DATA_ERROR);
    };

    let mut interpreter = Interpreter::new(StdioContext);
    match interpreter.execute(&program) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Runtime error: {error}");
            eprintln!("[{}]", error.position);
            ExitCode::from(EXIT_SOFTWARE)
        }
    }
}
