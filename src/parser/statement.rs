use super::{Parser, ParserError, ParserErrorKind};
use crate::ast::{FunctionDecl, Parameter, Position, Statement, StatementKind, VariableDecl};
use crate::lexer::{Token, TokenKind};
use compact_str::CompactString;

fn position(token: &Token) -> Position {
    Position::new(token.line, token.column)
}

impl Parser {
    pub(super) fn declaration(&mut self) -> Result<Statement, ParserError> {
        if let Some(keyword) = self.eat(TokenKind::KeywordFn) {
            return self.function_declaration(&keyword);
        }
        if let Some(keyword) = self.eat(TokenKind::KeywordLet) {
            return self.variable_declaration(&keyword);
        }
        self.statement()
    }

    fn statement(&mut self) -> Result<Statement, ParserError> {
        if let Some(keyword) = self.eat(TokenKind::KeywordIf) {
            return self.if_statement(&keyword);
        }
        if let Some(keyword) = self.eat(TokenKind::KeywordWhile) {
            return self.while_statement(&keyword);
        }
        if let Some(keyword) = self.eat(TokenKind::KeywordFor) {
            return self.for_statement(&keyword);
        }
        if let Some(keyword) = self.eat(TokenKind::KeywordReturn) {
            return self.return_statement(&keyword);
        }
        if self.check(TokenKind::LeftBrace) {
            let start = position(self.peek(0));
            let statements = self.block()?;
            return Ok(Statement::new(StatementKind::Block(statements), start));
        }
        self.expression_statement()
    }

    fn variable_declaration(&mut self, keyword: &Token) -> Result<Statement, ParserError> {
        let mutable = self.eat(TokenKind::KeywordMut).is_some();
        let name = self.consume(TokenKind::Ident, "Expect variable name");

        let type_name = match self.eat(TokenKind::Colon) {
            Some(_) => Some(self.type_name()),
            None => None,
        };
        let initial = match self.eat(TokenKind::Assign) {
            Some(_) => Some(self.expression()?),
            None => None,
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration");

        Ok(Statement::new(
            StatementKind::VariableDecl(VariableDecl {
                name: name.lexeme,
                type_name,
                initial,
                mutable,
            }),
            position(keyword),
        ))
    }

    fn function_declaration(&mut self, keyword: &Token) -> Result<Statement, ParserError> {
        let name = self.consume(TokenKind::Ident, "Expect function name");
        self.consume(TokenKind::LeftParenthesis, "Expect '(' after function name");
        let parameters = self.parameters();
        self.consume(TokenKind::RightParenthesis, "Expect ')' after parameters");

        let return_type = match self.eat(TokenKind::Arrow) {
            Some(_) => Some(self.type_name()),
            None => None,
        };
        let body = self.block()?;

        Ok(Statement::new(
            StatementKind::FunctionDecl(FunctionDecl {
                name: name.lexeme,
                parameters,
                return_type,
                body,
            }),
            position(keyword),
        ))
    }

    fn parameters(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        if self.check(TokenKind::RightParenthesis) {
            return parameters;
        }
        loop {
            let name = self.consume(TokenKind::Ident, "Expect parameter name");
            self.consume(TokenKind::Colon, "Expect ':' after parameter name");
            let type_name = self.type_name();
            parameters.push(Parameter {
                name: name.lexeme,
                type_name,
            });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        parameters
    }

    fn type_name(&mut self) -> CompactString {
        match self.eat(TokenKind::Ident) {
            Some(token) => token.lexeme,
            None => {
                self.report(ParserErrorKind::ExpectedTypeName);
                CompactString::default()
            }
        }
    }

    fn if_statement(&mut self, keyword: &Token) -> Result<Statement, ParserError> {
        let condition = self.expression()?;
        let success = self.statement()?;
        let failure = match self.eat(TokenKind::KeywordElse) {
            Some(_) => Some(Box::new(self.statement()?)),
            None => None,
        };

        Ok(Statement::new(
            StatementKind::If {
                condition,
                success: Box::new(success),
                failure,
            },
            position(keyword),
        ))
    }

    fn while_statement(&mut self, keyword: &Token) -> Result<Statement, ParserError> {
        let condition = self.expression()?;
        let body = self.statement()?;

        Ok(Statement::new(
            StatementKind::While {
                condition,
                body: Box::new(body),
            },
            position(keyword),
        ))
    }

    fn for_statement(&mut self, keyword: &Token) -> Result<Statement, ParserError> {
        let variable = self.consume(TokenKind::Ident, "Expect loop variable name");
        self.consume(TokenKind::KeywordIn, "Expect 'in' after loop variable");
        let start = self.expression()?;
        self.consume(TokenKind::Dot, "Expect '..' in range");
        self.consume(TokenKind::Dot, "Expect '..' in range");
        let end = self.expression()?;
        let body = self.statement()?;

        Ok(Statement::new(
            StatementKind::For {
                variable: variable.lexeme,
                start,
                end,
                body: Box::new(body),
            },
            position(keyword),
        ))
    }

    fn return_statement(&mut self, keyword: &Token) -> Result<Statement, ParserError> {
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value");

        Ok(Statement::new(StatementKind::Return(value), position(keyword)))
    }

    /// `{ declaration* }`. Failed declarations inside recover locally.
    fn block(&mut self) -> Result<Vec<Statement>, ParserError> {
        self.consume(TokenKind::LeftBrace, "Expect '{'");

        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::RightBrace) || self.is_at_end() {
                break;
            }
            if let Some(statement) = self.declaration_or_recover() {
                statements.push(statement);
            }
        }
        self.consume(TokenKind::RightBrace, "Expect '}'");

        Ok(statements)
    }

    fn expression_statement(&mut self) -> Result<Statement, ParserError> {
        let start = position(self.peek(0));
        let expression = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression");

        Ok(Statement::new(StatementKind::Expression(expression), start))
    }
}
