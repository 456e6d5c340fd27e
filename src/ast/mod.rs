mod formatter;
mod visitor;

use compact_str::CompactString;
pub use formatter::SExpressionFormatter;
use std::fmt::Display;
pub use visitor::{ExpressionVisitor, StatementVisitor};

/// 1-based source position of the token a node was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}, Column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Assign,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Assign => "=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
    Plus,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "not",
            UnaryOperator::Negate => "-",
            UnaryOperator::Plus => "+",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Integer(i64),
    Float(f64),
    String(CompactString),
    Bool(bool),
    Identifier(CompactString),
    Binary {
        operator: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        rhs: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Index {
        array: Box<Expression>,
        index: Box<Expression>,
    },
    Member {
        object: Box<Expression>,
        name: CompactString,
    },
    ContextConditional {
        inner: Box<Expression>,
        context: CompactString,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub position: Position,
}

impl Expression {
    pub fn new(kind: ExpressionKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn accept<V: ExpressionVisitor>(&self, visitor: &mut V) -> V::Output {
        match &self.kind {
            ExpressionKind::Integer(value) => visitor.visit_integer(self, *value),
            ExpressionKind::Float(value) => visitor.visit_float(self, *value),
            ExpressionKind::String(value) => visitor.visit_string(self, value),
            ExpressionKind::Bool(value) => visitor.visit_bool(self, *value),
            ExpressionKind::Identifier(name) => visitor.visit_identifier(self, name),
            ExpressionKind::Binary { operator, lhs, rhs } => {
                visitor.visit_binary(self, *operator, lhs, rhs)
            }
            ExpressionKind::Unary { operator, rhs } => visitor.visit_unary(self, *operator, rhs),
            ExpressionKind::Call { callee, arguments } => {
                visitor.visit_call(self, callee, arguments)
            }
            ExpressionKind::Index { array, index } => visitor.visit_index(self, array, index),
            ExpressionKind::Member { object, name } => visitor.visit_member(self, object, name),
            ExpressionKind::ContextConditional { inner, context } => {
                visitor.visit_context_conditional(self, inner, context)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: CompactString,
    pub type_name: Option<CompactString>,
    pub initial: Option<Expression>,
    pub mutable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: CompactString,
    pub type_name: CompactString,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: CompactString,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<CompactString>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Expression(Expression),
    VariableDecl(VariableDecl),
    Block(Vec<Statement>),
    FunctionDecl(FunctionDecl),
    Return(Option<Expression>),
    If {
        condition: Expression,
        success: Box<Statement>,
        failure: Option<Box<Statement>>,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    For {
        variable: CompactString,
        start: Expression,
        end: Expression,
        body: Box<Statement>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub position: Position,
}

impl Statement {
    pub fn new(kind: StatementKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn accept<V: StatementVisitor>(&self, visitor: &mut V) -> V::Output {
        match &self.kind {
            StatementKind::Expression(expression) => {
                visitor.visit_expression_statement(self, expression)
            }
            StatementKind::VariableDecl(decl) => visitor.visit_variable_decl(self, decl),
            StatementKind::Block(statements) => visitor.visit_block(self, statements),
            StatementKind::FunctionDecl(decl) => visitor.visit_function_decl(self, decl),
            StatementKind::Return(value) => visitor.visit_return(self, value.as_ref()),
            StatementKind::If {
                condition,
                success,
                failure,
            } => visitor.visit_if(self, condition, success, failure.as_deref()),
            StatementKind::While { condition, body } => visitor.visit_while(self, condition, body),
            StatementKind::For {
                variable,
                start,
                end,
                body,
            } => visitor.visit_for(self, variable, start, end, body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn accept<V: StatementVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_program(self)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&SExpressionFormatter.format_expression(self))
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&SExpressionFormatter.format_statement(self))
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&SExpressionFormatter.format_program(self))
    }
}
