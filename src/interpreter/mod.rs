pub mod context;
pub mod environment;
pub mod error;
pub mod native;
mod tree;
pub mod value;

use crate::ast::{Expression, Program, Statement};
use environment::Environment;
use error::RuntimeError;
use value::Value;

/// Console I/O as seen by scripts.
pub trait SystemContext {
    /// Writes `text` without a trailing newline.
    fn write(&mut self, text: &str);
    fn writeln(&mut self, text: &str);
    /// One line of input without its line terminator, `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

/// Tree-walking evaluator. Bindings live as long as the interpreter, so repeated calls to
/// [`Interpreter::execute`] share the global frame.
pub struct Interpreter<C> {
    environment: Environment,
    context: C,
}

impl<C: SystemContext> Interpreter<C> {
    pub fn new(context: C) -> Self {
        Self {
            environment: Environment::new(),
            context,
        }
    }

    /// Runs every top-level statement in order. The first failure aborts the run.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn execute(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let result = program.accept(self);
        if let Err(ref error) = result {
            tracing::debug!(%error, line = error.position.line, "execution failed");
        }
        result
    }

    pub fn execute_statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        statement.accept(self)
    }

    pub fn evaluate(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        expression.accept(self)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}
