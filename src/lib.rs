pub mod ast;
pub mod diagnostic;
pub mod interpreter;
pub mod lexer;
pub mod parser;

pub use interpreter::Interpreter;
pub use lexer::tokenize;
pub use parser::parse;
