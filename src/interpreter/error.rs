use crate::ast::Position;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(CompactString),
    #[error("Invalid operands for {operation}")]
    InvalidOperands { operation: &'static str },
    #[error("Invalid operand for {operation}")]
    InvalidOperand { operation: &'static str },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Modulo by zero")]
    ModuloByZero,
    #[error("Integer overflow")]
    IntegerOverflow,
    #[error("Function '{0}' is not defined")]
    UndefinedFunction(CompactString),
    #[error("Function calls with complex expressions not yet supported")]
    ComplexCallee,
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("{0} not yet implemented")]
    NotImplemented(&'static str),
    /// Argument count and type checks of the built-in functions.
    #[error("{0}")]
    InvalidArgument(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    #[source]
    pub kind: RuntimeErrorKind,
    /// Position of the node that failed.
    pub position: Position,
}
