use super::error::{RuntimeError, RuntimeErrorKind};
use super::native;
use super::value::Value;
use super::{Interpreter, SystemContext};
use crate::ast::{
    BinaryOperator, Expression, ExpressionKind, ExpressionVisitor, FunctionDecl, Position,
    Program, Statement, StatementVisitor, UnaryOperator, VariableDecl,
};
use compact_str::CompactString;

trait AtPosition<T> {
    fn at(self, position: Position) -> Result<T, RuntimeError>;
}

impl<T> AtPosition<T> for Result<T, RuntimeErrorKind> {
    fn at(self, position: Position) -> Result<T, RuntimeError> {
        self.map_err(|kind| RuntimeError { kind, position })
    }
}

fn fail<T>(kind: RuntimeErrorKind, position: Position) -> Result<T, RuntimeError> {
    Err(RuntimeError { kind, position })
}

impl<C: SystemContext> Interpreter<C> {
    fn execute_all(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            statement.accept(self)?;
        }
        Ok(())
    }

    fn assign(
        &mut self,
        node: &Expression,
        target: &Expression,
        rhs: &Expression,
    ) -> Result<Value, RuntimeError> {
        let ExpressionKind::Identifier(ref name) = target.kind else {
            return fail(RuntimeErrorKind::InvalidAssignmentTarget, node.position);
        };
        let value = rhs.accept(self)?;
        self.environment
            .assign(name, value.clone())
            .at(node.position)?;
        Ok(value)
    }
}

impl<C: SystemContext> ExpressionVisitor for Interpreter<C> {
    type Output = Result<Value, RuntimeError>;

    fn visit_integer(&mut self, _: &Expression, value: i64) -> Result<Value, RuntimeError> {
        Ok(Value::Integer(value))
    }

    fn visit_float(&mut self, _: &Expression, value: f64) -> Result<Value, RuntimeError> {
        Ok(Value::Float(value))
    }

    fn visit_string(
        &mut self,
        _: &Expression,
        value: &CompactString,
    ) -> Result<Value, RuntimeError> {
        Ok(Value::String(value.clone()))
    }

    fn visit_bool(&mut self, _: &Expression, value: bool) -> Result<Value, RuntimeError> {
        Ok(Value::Bool(value))
    }

    fn visit_identifier(
        &mut self,
        node: &Expression,
        name: &CompactString,
    ) -> Result<Value, RuntimeError> {
        match self.environment.access(name) {
            Some(value) => Ok(value.clone()),
            None => fail(RuntimeErrorKind::UndefinedVariable(name.clone()), node.position),
        }
    }

    fn visit_binary(
        &mut self,
        node: &Expression,
        operator: BinaryOperator,
        lhs: &Expression,
        rhs: &Expression,
    ) -> Result<Value, RuntimeError> {
        if operator == BinaryOperator::Assign {
            return self.assign(node, lhs, rhs);
        }

        // Both operands are always evaluated, `and`/`or` included.
        let lhs = lhs.accept(self)?;
        let rhs = rhs.accept(self)?;
        let result = match operator {
            BinaryOperator::Add => lhs.add(&rhs),
            BinaryOperator::Sub => lhs.subtract(&rhs),
            BinaryOperator::Mul => lhs.multiply(&rhs),
            BinaryOperator::Div => lhs.divide(&rhs),
            BinaryOperator::Mod => lhs.modulo(&rhs),
            BinaryOperator::Lt => lhs.less_than(&rhs),
            BinaryOperator::Le => lhs.less_than_or_equal(&rhs),
            BinaryOperator::Gt => lhs.greater_than(&rhs),
            BinaryOperator::Ge => lhs.greater_than_or_equal(&rhs),
            BinaryOperator::Eq => Ok(lhs.is_equal(&rhs)),
            BinaryOperator::Ne => Ok(lhs.is_not_equal(&rhs)),
            BinaryOperator::And => Ok(Value::Bool(lhs.is_truthy() && rhs.is_truthy())),
            BinaryOperator::Or => Ok(Value::Bool(lhs.is_truthy() || rhs.is_truthy())),
            BinaryOperator::Assign => Err(RuntimeErrorKind::InvalidAssignmentTarget),
        };
        result.at(node.position)
    }

    fn visit_unary(
        &mut self,
        node: &Expression,
        operator: UnaryOperator,
        rhs: &Expression,
    ) -> Result<Value, RuntimeError> {
        let rhs = rhs.accept(self)?;
        match operator {
            UnaryOperator::Not => Ok(rhs.logical_not()),
            UnaryOperator::Negate => rhs.negate().at(node.position),
            UnaryOperator::Plus => rhs.plus().at(node.position),
        }
    }

    fn visit_call(
        &mut self,
        node: &Expression,
        callee: &Expression,
        arguments: &[Expression],
    ) -> Result<Value, RuntimeError> {
        let ExpressionKind::Identifier(ref name) = callee.kind else {
            return fail(RuntimeErrorKind::ComplexCallee, node.position);
        };
        let Some(function) = native::lookup(name) else {
            return fail(RuntimeErrorKind::UndefinedFunction(name.clone()), node.position);
        };

        let arguments = arguments
            .iter()
            .map(|argument| argument.accept(self))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::trace!(function = function.get_name(), arguments = arguments.len(), "native call");
        function
            .call(&arguments, &mut self.context)
            .at(node.position)
    }

    fn visit_index(
        &mut self,
        node: &Expression,
        _: &Expression,
        _: &Expression,
    ) -> Result<Value, RuntimeError> {
        fail(RuntimeErrorKind::NotImplemented("Array access"), node.position)
    }

    fn visit_member(
        &mut self,
        node: &Expression,
        _: &Expression,
        _: &CompactString,
    ) -> Result<Value, RuntimeError> {
        fail(RuntimeErrorKind::NotImplemented("Member access"), node.position)
    }

    fn visit_context_conditional(
        &mut self,
        node: &Expression,
        _: &Expression,
        _: &CompactString,
    ) -> Result<Value, RuntimeError> {
        fail(
            RuntimeErrorKind::NotImplemented("Context conditionals"),
            node.position,
        )
    }
}

impl<C: SystemContext> StatementVisitor for Interpreter<C> {
    type Output = Result<(), RuntimeError>;

    fn visit_program(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.execute_all(&program.statements)
    }

    fn visit_expression_statement(
        &mut self,
        _: &Statement,
        expression: &Expression,
    ) -> Result<(), RuntimeError> {
        expression.accept(self)?;
        Ok(())
    }

    fn visit_variable_decl(
        &mut self,
        _: &Statement,
        decl: &VariableDecl,
    ) -> Result<(), RuntimeError> {
        let value = match decl.initial {
            Some(ref initial) => initial.accept(self)?,
            None => Value::default(),
        };
        tracing::trace!(name = %decl.name, %value, "declare");
        self.environment.declare(&decl.name, value);
        Ok(())
    }

    fn visit_block(&mut self, _: &Statement, statements: &[Statement]) -> Result<(), RuntimeError> {
        self.environment.enter_scope();
        tracing::trace!(depth = self.environment.depth(), "enter scope");
        let result = self.execute_all(statements);
        self.environment.exit_scope();
        tracing::trace!(depth = self.environment.depth(), "exit scope");
        result
    }

    fn visit_function_decl(
        &mut self,
        _: &Statement,
        decl: &FunctionDecl,
    ) -> Result<(), RuntimeError> {
        self.context.writeln(&format!(
            "Function '{}' defined (not yet executable)",
            decl.name
        ));
        Ok(())
    }

    fn visit_return(
        &mut self,
        node: &Statement,
        _: Option<&Expression>,
    ) -> Result<(), RuntimeError> {
        fail(
            RuntimeErrorKind::NotImplemented("Return statements"),
            node.position,
        )
    }

    fn visit_if(
        &mut self,
        _: &Statement,
        condition: &Expression,
        success: &Statement,
        failure: Option<&Statement>,
    ) -> Result<(), RuntimeError> {
        if condition.accept(self)?.is_truthy() {
            success.accept(self)
        } else if let Some(failure) = failure {
            failure.accept(self)
        } else {
            Ok(())
        }
    }

    fn visit_while(
        &mut self,
        _: &Statement,
        condition: &Expression,
        body: &Statement,
    ) -> Result<(), RuntimeError> {
        while condition.accept(self)?.is_truthy() {
            body.accept(self)?;
        }
        Ok(())
    }

    fn visit_for(
        &mut self,
        node: &Statement,
        _: &CompactString,
        _: &Expression,
        _: &Expression,
        _: &Statement,
    ) -> Result<(), RuntimeError> {
        fail(RuntimeErrorKind::NotImplemented("For loops"), node.position)
    }
}
