use super::{
    BinaryOperator, Expression, FunctionDecl, Program, Statement, UnaryOperator, VariableDecl,
};
use compact_str::CompactString;

/// One method per expression variant. `node` is the visited expression itself.
pub trait ExpressionVisitor {
    type Output;

    fn visit_integer(&mut self, node: &Expression, value: i64) -> Self::Output;
    fn visit_float(&mut self, node: &Expression, value: f64) -> Self::Output;
    fn visit_string(&mut self, node: &Expression, value: &CompactString) -> Self::Output;
    fn visit_bool(&mut self, node: &Expression, value: bool) -> Self::Output;
    fn visit_identifier(&mut self, node: &Expression, name: &CompactString) -> Self::Output;
    fn visit_binary(
        &mut self,
        node: &Expression,
        operator: BinaryOperator,
        lhs: &Expression,
        rhs: &Expression,
    ) -> Self::Output;
    fn visit_unary(
        &mut self,
        node: &Expression,
        operator: UnaryOperator,
        rhs: &Expression,
    ) -> Self::Output;
    fn visit_call(
        &mut self,
        node: &Expression,
        callee: &Expression,
        arguments: &[Expression],
    ) -> Self::Output;
    fn visit_index(
        &mut self,
        node: &Expression,
        array: &Expression,
        index: &Expression,
    ) -> Self::Output;
    fn visit_member(
        &mut self,
        node: &Expression,
        object: &Expression,
        name: &CompactString,
    ) -> Self::Output;
    fn visit_context_conditional(
        &mut self,
        node: &Expression,
        inner: &Expression,
        context: &CompactString,
    ) -> Self::Output;
}

/// One method per statement variant, plus the program root.
pub trait StatementVisitor {
    type Output;

    fn visit_program(&mut self, program: &Program) -> Self::Output;
    fn visit_expression_statement(
        &mut self,
        node: &Statement,
        expression: &Expression,
    ) -> Self::Output;
    fn visit_variable_decl(&mut self, node: &Statement, decl: &VariableDecl) -> Self::Output;
    fn visit_block(&mut self, node: &Statement, statements: &[Statement]) -> Self::Output;
    fn visit_function_decl(&mut self, node: &Statement, decl: &FunctionDecl) -> Self::Output;
    fn visit_return(&mut self, node: &Statement, value: Option<&Expression>) -> Self::Output;
    fn visit_if(
        &mut self,
        node: &Statement,
        condition: &Expression,
        success: &Statement,
        failure: Option<&Statement>,
    ) -> Self::Output;
    fn visit_while(
        &mut self,
        node: &Statement,
        condition: &Expression,
        body: &Statement,
    ) -> Self::Output;
    fn visit_for(
        &mut self,
        node: &Statement,
        variable: &CompactString,
        start: &Expression,
        end: &Expression,
        body: &Statement,
    ) -> Self::Output;
}
