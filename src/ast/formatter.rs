use super::{
    BinaryOperator, Expression, ExpressionVisitor, FunctionDecl, Program, Statement,
    StatementVisitor, UnaryOperator, VariableDecl,
};
use compact_str::CompactString;

/// Renders trees as S-expressions, children in source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    pub fn format_expression(&mut self, expression: &Expression) -> String {
        expression.accept(self)
    }

    pub fn format_statement(&mut self, statement: &Statement) -> String {
        statement.accept(self)
    }

    pub fn format_program(&mut self, program: &Program) -> String {
        program.accept(self)
    }

    fn format_list(&mut self, head: &str, statements: &[Statement]) -> String {
        let mut buffer = format!("({head}");
        for statement in statements {
            buffer.push(' ');
            buffer.push_str(&statement.accept(self));
        }
        buffer.push(')');
        buffer
    }
}

impl ExpressionVisitor for SExpressionFormatter {
    type Output = String;

    fn visit_integer(&mut self, _: &Expression, value: i64) -> String {
        format!("{value}")
    }

    fn visit_float(&mut self, _: &Expression, value: f64) -> String {
        format!("{value:?}")
    }

    fn visit_string(&mut self, _: &Expression, value: &CompactString) -> String {
        format!("{:?}", value.as_str())
    }

    fn visit_bool(&mut self, _: &Expression, value: bool) -> String {
        format!("{value}")
    }

    fn visit_identifier(&mut self, _: &Expression, name: &CompactString) -> String {
        name.to_string()
    }

    fn visit_binary(
        &mut self,
        _: &Expression,
        operator: BinaryOperator,
        lhs: &Expression,
        rhs: &Expression,
    ) -> String {
        format!(
            "({} {} {})",
            operator.symbol(),
            lhs.accept(self),
            rhs.accept(self)
        )
    }

    fn visit_unary(&mut self, _: &Expression, operator: UnaryOperator, rhs: &Expression) -> String {
        format!("({} {})", operator.symbol(), rhs.accept(self))
    }

    fn visit_call(
        &mut self,
        _: &Expression,
        callee: &Expression,
        arguments: &[Expression],
    ) -> String {
        let mut buffer = format!("(call {}", callee.accept(self));
        for argument in arguments {
            buffer.push(' ');
            buffer.push_str(&argument.accept(self));
        }
        buffer.push(')');
        buffer
    }

    fn visit_index(&mut self, _: &Expression, array: &Expression, index: &Expression) -> String {
        format!("(index {} {})", array.accept(self), index.accept(self))
    }

    fn visit_member(
        &mut self,
        _: &Expression,
        object: &Expression,
        name: &CompactString,
    ) -> String {
        format!("(. {} {name})", object.accept(self))
    }

    fn visit_context_conditional(
        &mut self,
        _: &Expression,
        inner: &Expression,
        context: &CompactString,
    ) -> String {
        format!("(context {} {:?})", inner.accept(self), context.as_str())
    }
}

impl StatementVisitor for SExpressionFormatter {
    type Output = String;

    fn visit_program(&mut self, program: &Program) -> String {
        program
            .statements
            .iter()
            .map(|statement| statement.accept(self))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn visit_expression_statement(&mut self, _: &Statement, expression: &Expression) -> String {
        format!("(expr {})", expression.accept(self))
    }

    fn visit_variable_decl(&mut self, _: &Statement, decl: &VariableDecl) -> String {
        let mut buffer = String::from("(let ");
        if decl.mutable {
            buffer.push_str("mut ");
        }
        buffer.push_str(&decl.name);
        if let Some(ref type_name) = decl.type_name {
            buffer.push_str(": ");
            buffer.push_str(type_name);
        }
        if let Some(ref initial) = decl.initial {
            buffer.push(' ');
            buffer.push_str(&initial.accept(self));
        }
        buffer.push(')');
        buffer
    }

    fn visit_block(&mut self, _: &Statement, statements: &[Statement]) -> String {
        self.format_list("block", statements)
    }

    fn visit_function_decl(&mut self, _: &Statement, decl: &FunctionDecl) -> String {
        let parameters = decl
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_name))
            .collect::<Vec<_>>()
            .join(" ");
        let return_type = decl
            .return_type
            .as_ref()
            .map(|t| format!(" -> {t}"))
            .unwrap_or_default();
        format!(
            "(fn {} ({parameters}){return_type} {})",
            decl.name,
            self.format_list("block", &decl.body)
        )
    }

    fn visit_return(&mut self, _: &Statement, value: Option<&Expression>) -> String {
        match value {
            Some(value) => format!("(return {})", value.accept(self)),
            None => "(return)".into(),
        }
    }

    fn visit_if(
        &mut self,
        _: &Statement,
        condition: &Expression,
        success: &Statement,
        failure: Option<&Statement>,
    ) -> String {
        let condition = condition.accept(self);
        let success = success.accept(self);
        match failure {
            Some(failure) => format!("(if {condition} {success} {})", failure.accept(self)),
            None => format!("(if {condition} {success})"),
        }
    }

    fn visit_while(&mut self, _: &Statement, condition: &Expression, body: &Statement) -> String {
        format!("(while {} {})", condition.accept(self), body.accept(self))
    }

    fn visit_for(
        &mut self,
        _: &Statement,
        variable: &CompactString,
        start: &Expression,
        end: &Expression,
        body: &Statement,
    ) -> String {
        format!(
            "(for {variable} {} {} {})",
            start.accept(self),
            end.accept(self),
            body.accept(self)
        )
    }
}
