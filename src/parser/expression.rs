use super::{Parser, ParserError, ParserErrorKind};
use crate::ast::{BinaryOperator, Expression, ExpressionKind, Position, UnaryOperator};
use crate::lexer::{Token, TokenKind};

fn position(token: &Token) -> Position {
    Position::new(token.line, token.column)
}

type OperatorTable = &'static [(TokenKind, BinaryOperator)];

const OR: OperatorTable = &[(TokenKind::KeywordOr, BinaryOperator::Or)];
const AND: OperatorTable = &[(TokenKind::KeywordAnd, BinaryOperator::And)];
const EQUALITY: OperatorTable = &[
    (TokenKind::EqualEqual, BinaryOperator::Eq),
    (TokenKind::BangEqual, BinaryOperator::Ne),
];
const COMPARISON: OperatorTable = &[
    (TokenKind::LessThan, BinaryOperator::Lt),
    (TokenKind::LessThanEqual, BinaryOperator::Le),
    (TokenKind::GreaterThan, BinaryOperator::Gt),
    (TokenKind::GreaterThanEqual, BinaryOperator::Ge),
];
const TERM: OperatorTable = &[
    (TokenKind::Plus, BinaryOperator::Add),
    (TokenKind::Minus, BinaryOperator::Sub),
];
const FACTOR: OperatorTable = &[
    (TokenKind::Star, BinaryOperator::Mul),
    (TokenKind::Slash, BinaryOperator::Div),
    (TokenKind::Percent, BinaryOperator::Mod),
];

// Precedence climbing, lowest to highest.
impl Parser {
    pub(super) fn expression(&mut self) -> Result<Expression, ParserError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expression, ParserError> {
        let lhs = self.logical_or()?;

        if let Some(equals) = self.eat(TokenKind::Assign) {
            let rhs = self.assignment()?;
            if matches!(lhs.kind, ExpressionKind::Identifier(_)) {
                return Ok(Expression::new(
                    ExpressionKind::Binary {
                        operator: BinaryOperator::Assign,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    position(&equals),
                ));
            }
            self.errors.push(ParserError::at(
                ParserErrorKind::InvalidAssignmentTarget,
                &equals,
            ));
        }

        Ok(lhs)
    }

    fn binary_level(
        &mut self,
        operators: OperatorTable,
        next: fn(&mut Self) -> Result<Expression, ParserError>,
    ) -> Result<Expression, ParserError> {
        let mut lhs = next(self)?;
        while let Some((token, operator)) = self.eat_operator(operators) {
            let rhs = next(self)?;
            lhs = Expression::new(
                ExpressionKind::Binary {
                    operator,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                position(&token),
            );
        }
        Ok(lhs)
    }

    fn eat_operator(&mut self, operators: OperatorTable) -> Option<(Token, BinaryOperator)> {
        operators
            .iter()
            .find_map(|&(kind, operator)| self.eat(kind).map(|token| (token, operator)))
    }

    fn logical_or(&mut self) -> Result<Expression, ParserError> {
        self.binary_level(OR, Self::logical_and)
    }

    fn logical_and(&mut self) -> Result<Expression, ParserError> {
        self.binary_level(AND, Self::equality)
    }

    fn equality(&mut self) -> Result<Expression, ParserError> {
        self.binary_level(EQUALITY, Self::comparison)
    }

    fn comparison(&mut self) -> Result<Expression, ParserError> {
        self.binary_level(COMPARISON, Self::term)
    }

    fn term(&mut self) -> Result<Expression, ParserError> {
        self.binary_level(TERM, Self::factor)
    }

    fn factor(&mut self) -> Result<Expression, ParserError> {
        self.binary_level(FACTOR, Self::unary)
    }

    fn unary(&mut self) -> Result<Expression, ParserError> {
        let operator_token = self.eat_any(&[
            TokenKind::KeywordNot,
            TokenKind::Bang,
            TokenKind::Minus,
            TokenKind::Plus,
        ]);
        let Some(operator_token) = operator_token else {
            return self.call();
        };

        let operator = match operator_token.kind {
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Plus => UnaryOperator::Plus,
            _ => UnaryOperator::Not,
        };
        let rhs = self.unary()?;
        Ok(Expression::new(
            ExpressionKind::Unary {
                operator,
                rhs: Box::new(rhs),
            },
            position(&operator_token),
        ))
    }

    fn call(&mut self) -> Result<Expression, ParserError> {
        let mut expression = self.primary()?;

        loop {
            if self.eat(TokenKind::LeftParenthesis).is_some() {
                expression = self.finish_call(expression)?;
            } else if self.eat(TokenKind::LeftBracket).is_some() {
                expression = self.finish_index(expression)?;
            } else if self.check(TokenKind::Dot) && self.peek(1).kind != TokenKind::Dot {
                // `..` is left for range syntax.
                self.advance();
                expression = self.finish_member(expression);
            } else {
                break;
            }
        }

        if self.check(TokenKind::KeywordIf)
            && self.peek(1).kind == TokenKind::Ident
            && self.peek(2).kind == TokenKind::EqualEqual
        {
            return Ok(self.context_conditional(expression));
        }

        Ok(expression)
    }

    fn finish_call(&mut self, callee: Expression) -> Result<Expression, ParserError> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParenthesis) {
            loop {
                arguments.push(self.expression()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParenthesis, "Expect ')' after arguments");

        let position = callee.position;
        Ok(Expression::new(
            ExpressionKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            position,
        ))
    }

    fn finish_index(&mut self, array: Expression) -> Result<Expression, ParserError> {
        let index = self.expression()?;
        self.consume(TokenKind::RightBracket, "Expect ']' after array index");

        let position = array.position;
        Ok(Expression::new(
            ExpressionKind::Index {
                array: Box::new(array),
                index: Box::new(index),
            },
            position,
        ))
    }

    fn finish_member(&mut self, object: Expression) -> Expression {
        let name = self.consume(TokenKind::Ident, "Expect property name after '.'");
        let position = object.position;
        Expression::new(
            ExpressionKind::Member {
                object: Box::new(object),
                name: name.lexeme,
            },
            position,
        )
    }

    /// `expr if context == == "name"`. The comparison is spelled with two `==` tokens.
    fn context_conditional(&mut self, inner: Expression) -> Expression {
        self.consume(TokenKind::KeywordIf, "Expected 'if' for context conditional");
        self.consume(TokenKind::Ident, "Expected 'context' identifier");
        self.consume(TokenKind::EqualEqual, "Expected '==' in context conditional");
        self.consume(TokenKind::EqualEqual, "Expected '==' in context conditional");

        let Some(context) = self.eat(TokenKind::String) else {
            self.report(ParserErrorKind::ExpectedContextString);
            return inner;
        };
        let context = context.string().cloned().unwrap_or_default();

        let position = inner.position;
        Expression::new(
            ExpressionKind::ContextConditional {
                inner: Box::new(inner),
                context,
            },
            position,
        )
    }

    fn primary(&mut self) -> Result<Expression, ParserError> {
        let token = self.peek(0).clone();
        let kind = match token.kind {
            TokenKind::Boolean => ExpressionKind::Bool(token.boolean().unwrap_or_default()),
            TokenKind::Integer => ExpressionKind::Integer(token.integer().unwrap_or_default()),
            TokenKind::Float => ExpressionKind::Float(token.float().unwrap_or_default()),
            TokenKind::String => {
                ExpressionKind::String(token.string().cloned().unwrap_or_default())
            }
            TokenKind::Ident => ExpressionKind::Identifier(token.lexeme.clone()),
            TokenKind::LeftParenthesis => {
                self.advance();
                let inner = self.expression()?;
                self.consume(TokenKind::RightParenthesis, "Expect ')' after expression");
                return Ok(inner);
            }
            _ => return Err(self.error_here(ParserErrorKind::ExpectedExpression)),
        };
        self.advance();
        Ok(Expression::new(kind, position(&token)))
    }
}
