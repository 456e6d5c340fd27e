mod cursor;
mod error;
pub mod formatter;
mod token;

use compact_str::CompactString;
use cursor::{Cursor, SourceLocation};
pub use error::{LexicalError, LexicalErrorKind};
pub use token::{Literal, Span, Token, TokenKind, ANNOTATION_HASHMAP, KEYWORD_HASHMAP};

/// Tokenizes `source` and returns the token stream with the diagnostics collected along the way.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexicalError>) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    (tokens, lexer.into_errors())
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
    start: SourceLocation,
    errors: Vec<LexicalError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            start: SourceLocation::default(),
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexicalError> {
        self.errors
    }

    /// The diagnostics rendered as `Line L, Column C: message`.
    pub fn diagnostics(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Lexes the whole source. Comments are dropped, lexing stops after the first error token and
    /// the stream always ends with a single `Eof`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.source.len()))]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::Comment => continue,
                TokenKind::Eof => {
                    tokens.push(token);
                    break;
                }
                TokenKind::Error => {
                    tokens.push(token);
                    tokens.push(self.eof());
                    break;
                }
                _ => tokens.push(token),
            }
        }
        tracing::debug!(
            tokens = tokens.len(),
            errors = self.errors.len(),
            "tokenized source"
        );
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.cursor.location();

        let Some(c) = self.cursor.advance() else {
            return self.eof();
        };

        let token = match c {
            '\n' => self.make_token(TokenKind::Newline),
            '"' => self.string(),
            '@' => self.annotation(),
            '#' => self.tag(),
            c if c.is_ascii_digit() => self.number(),
            c if is_identifier_start(c) => self.identifier(),
            '/' if self.cursor.eat('/') => {
                self.cursor.eat_while(|c| c != '\n');
                self.make_token(TokenKind::Comment)
            }
            '/' if self.cursor.eat('*') => self.block_comment(),
            c => self.operator(c),
        };
        tracing::trace!(kind = %token.kind, lexeme = %token.lexeme, "token");
        token
    }
}

impl<'src> Lexer<'src> {
    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start.offset..self.cursor.location().offset]
    }

    fn span(&self) -> Span {
        Span::new(self.start.offset, self.cursor.location().offset)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        self.make_literal(kind, None)
    }

    fn make_literal(&self, kind: TokenKind, literal: Option<Literal>) -> Token {
        Token {
            kind,
            lexeme: self.lexeme().into(),
            literal,
            span: self.span(),
            line: self.start.line,
            column: self.start.column,
        }
    }

    fn eof(&self) -> Token {
        let location = self.cursor.location();
        Token {
            kind: TokenKind::Eof,
            lexeme: CompactString::default(),
            literal: None,
            span: Span::new(location.offset, location.offset),
            line: location.line,
            column: location.column,
        }
    }

    fn report(&mut self, kind: LexicalErrorKind) {
        tracing::debug!(line = self.start.line, column = self.start.column, %kind, "lexical error");
        self.errors.push(LexicalError {
            kind,
            span: self.span(),
            line: self.start.line,
            column: self.start.column,
        });
    }

    fn error(&mut self, kind: LexicalErrorKind) -> Token {
        self.report(kind);
        self.make_token(TokenKind::Error)
    }

    fn block_comment(&mut self) -> Token {
        while let Some(c) = self.cursor.advance() {
            if c == '*' && self.cursor.eat('/') {
                break;
            }
        }
        self.make_token(TokenKind::Comment)
    }

    fn string(&mut self) -> Token {
        let mut value = CompactString::default();
        let mut bad_escapes = Vec::new();
        loop {
            match self.cursor.advance() {
                None => return self.error(LexicalErrorKind::UnclosedString),
                Some('"') => break,
                Some('\\') => match self.cursor.advance() {
                    None => return self.error(LexicalErrorKind::UnclosedString),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some(other) => {
                        bad_escapes.push(other);
                        value.push(other);
                    }
                },
                Some(c) => value.push(c),
            }
        }
        for c in bad_escapes {
            self.report(LexicalErrorKind::UnknownEscape(c));
        }
        self.make_literal(TokenKind::String, Some(Literal::String(value)))
    }

    fn number(&mut self) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let is_float = self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            // Digits with a single interior dot always parse.
            let value: f64 = self.lexeme().parse().unwrap_or_default();
            return self.make_literal(TokenKind::Float, Some(Literal::Float(value)));
        }

        match self.lexeme().parse::<i64>() {
            Ok(value) => self.make_literal(TokenKind::Integer, Some(Literal::Integer(value))),
            Err(_) => self.error(LexicalErrorKind::IntegerOutOfRange),
        }
    }

    fn identifier(&mut self) -> Token {
        self.cursor.eat_while(is_identifier_continue);
        let lexeme = self.lexeme();
        match KEYWORD_HASHMAP.get(lexeme) {
            Some(TokenKind::Boolean) => {
                self.make_literal(TokenKind::Boolean, Some(Literal::Bool(lexeme == "true")))
            }
            Some(kind) => self.make_token(*kind),
            None => self.make_token(TokenKind::Ident),
        }
    }

    fn annotation(&mut self) -> Token {
        self.cursor.eat_while(is_identifier_continue);
        let lexeme = self.lexeme();
        match ANNOTATION_HASHMAP.get(lexeme) {
            Some(kind) => self.make_token(*kind),
            None => self.error(LexicalErrorKind::UnknownAnnotation(lexeme.into())),
        }
    }

    fn tag(&mut self) -> Token {
        if self.cursor.peek().is_some_and(is_identifier_start) {
            self.cursor.eat_while(|c| is_identifier_continue(c) || c == ':');
            self.make_token(TokenKind::Tag)
        } else {
            self.make_token(TokenKind::Hash)
        }
    }

    fn operator(&mut self, c: char) -> Token {
        let kind = match c {
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '?' => TokenKind::Question,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '+' if self.cursor.eat('=') => TokenKind::PlusEqual,
            '+' => TokenKind::Plus,
            '-' if self.cursor.eat('=') => TokenKind::MinusEqual,
            '-' if self.cursor.eat('>') => TokenKind::Arrow,
            '-' => TokenKind::Minus,
            '=' if self.cursor.eat('=') => TokenKind::EqualEqual,
            '=' if self.cursor.eat('>') => TokenKind::FatArrow,
            '=' => TokenKind::Assign,
            '!' if self.cursor.eat('=') => TokenKind::BangEqual,
            '!' => TokenKind::Bang,
            '<' if self.cursor.eat('=') => TokenKind::LessThanEqual,
            '<' => TokenKind::LessThan,
            '>' if self.cursor.eat('=') => TokenKind::GreaterThanEqual,
            '>' => TokenKind::GreaterThan,
            ':' if self.cursor.eat(':') => TokenKind::DoubleColon,
            ':' => TokenKind::Colon,
            other => return self.error(LexicalErrorKind::Unrecognized(other)),
        };
        self.make_token(kind)
    }
}
