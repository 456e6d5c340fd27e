mod span;

use compact_str::CompactString;
pub use span::Span;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

/// The hashmap for keywords
pub static KEYWORD_HASHMAP: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("let", TokenKind::KeywordLet);
    map.insert("mut", TokenKind::KeywordMut);
    map.insert("fn", TokenKind::KeywordFn);
    map.insert("if", TokenKind::KeywordIf);
    map.insert("else", TokenKind::KeywordElse);
    map.insert("while", TokenKind::KeywordWhile);
    map.insert("for", TokenKind::KeywordFor);
    map.insert("in", TokenKind::KeywordIn);
    map.insert("return", TokenKind::KeywordReturn);
    map.insert("import", TokenKind::KeywordImport);
    map.insert("export", TokenKind::KeywordExport);
    map.insert("with", TokenKind::KeywordWith);
    map.insert("capabilities", TokenKind::KeywordCapabilities);
    map.insert("capsule", TokenKind::KeywordCapsule);
    map.insert("dsl", TokenKind::KeywordDsl);
    map.insert("fallback", TokenKind::KeywordFallback);
    map.insert("retry", TokenKind::KeywordRetry);
    map.insert("context", TokenKind::KeywordContext);
    map.insert("over", TokenKind::KeywordOver);
    map.insert("tag", TokenKind::KeywordTag);
    map.insert("did", TokenKind::KeywordDid);
    map.insert("evolving", TokenKind::KeywordEvolving);
    map.insert("nil", TokenKind::KeywordNil);
    map.insert("and", TokenKind::KeywordAnd);
    map.insert("or", TokenKind::KeywordOr);
    map.insert("not", TokenKind::KeywordNot);
    map.insert("observable", TokenKind::KeywordObservable);
    map.insert("subscribe", TokenKind::KeywordSubscribe);
    map.insert("emit", TokenKind::KeywordEmit);
    map.insert("transition", TokenKind::KeywordTransition);
    map.insert("timeline", TokenKind::KeywordTimeline);
    map.insert("verify", TokenKind::KeywordVerify);
    map.insert("proof", TokenKind::KeywordProof);
    map.insert("has_proof", TokenKind::KeywordHasProof);
    map.insert("true", TokenKind::Boolean);
    map.insert("false", TokenKind::Boolean);
    map
});

/// Execution model annotations, keyed with their leading `@`.
pub static ANNOTATION_HASHMAP: LazyLock<HashMap<&'static str, TokenKind>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();
        map.insert("@sync", TokenKind::AtSync);
        map.insert("@async", TokenKind::AtAsync);
        map.insert("@parallel", TokenKind::AtParallel);
        map.insert("@reactive", TokenKind::AtReactive);
        map.insert("@temporal", TokenKind::AtTemporal);
        map
    });

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Integer,
    Float,
    String,
    Boolean,
    Ident,

    // Keywords
    KeywordLet,
    KeywordMut,
    KeywordFn,
    KeywordIf,
    KeywordElse,
    KeywordWhile,
    KeywordFor,
    KeywordIn,
    KeywordReturn,
    KeywordImport,
    KeywordExport,
    KeywordWith,
    KeywordCapabilities,
    KeywordCapsule,
    KeywordDsl,
    KeywordFallback,
    KeywordRetry,
    KeywordContext,
    KeywordOver,
    KeywordTag,
    KeywordDid,
    KeywordEvolving,
    KeywordNil,
    KeywordAnd,
    KeywordOr,
    KeywordNot,
    KeywordObservable,
    KeywordSubscribe,
    KeywordEmit,
    KeywordTransition,
    KeywordTimeline,
    KeywordVerify,
    KeywordProof,
    KeywordHasProof,

    // Annotations
    AtSync,
    AtAsync,
    AtParallel,
    AtReactive,
    AtTemporal,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    PlusEqual,
    MinusEqual,
    Arrow,
    FatArrow,
    Bang,
    EqualEqual,
    BangEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,

    // Punctuation
    Semicolon,
    Comma,
    Dot,
    Colon,
    DoubleColon,
    Question,

    // Brackets
    LeftParenthesis,
    RightParenthesis,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // Semantic tags
    Hash,
    Tag,

    // Structural
    Newline,
    Comment,
    Error,
    Eof,
}

impl TokenKind {
    /// Tokens that open a new declaration, used by the parser to resynchronise.
    pub fn starts_declaration(&self) -> bool {
        matches!(
            self,
            TokenKind::KeywordFn
                | TokenKind::KeywordLet
                | TokenKind::KeywordIf
                | TokenKind::KeywordWhile
                | TokenKind::KeywordFor
                | TokenKind::KeywordReturn
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::KeywordLet => "LET",
            TokenKind::KeywordMut => "MUT",
            TokenKind::KeywordFn => "FN",
            TokenKind::KeywordIf => "IF",
            TokenKind::KeywordElse => "ELSE",
            TokenKind::KeywordWhile => "WHILE",
            TokenKind::KeywordFor => "FOR",
            TokenKind::KeywordIn => "IN",
            TokenKind::KeywordReturn => "RETURN",
            TokenKind::KeywordImport => "IMPORT",
            TokenKind::KeywordExport => "EXPORT",
            TokenKind::KeywordWith => "WITH",
            TokenKind::KeywordCapabilities => "CAPABILITIES",
            TokenKind::KeywordCapsule => "CAPSULE",
            TokenKind::KeywordDsl => "DSL",
            TokenKind::KeywordFallback => "FALLBACK",
            TokenKind::KeywordRetry => "RETRY",
            TokenKind::KeywordContext => "CONTEXT",
            TokenKind::KeywordOver => "OVER",
            TokenKind::KeywordTag => "TAG_KEYWORD",
            TokenKind::KeywordDid => "DID",
            TokenKind::KeywordEvolving => "EVOLVING",
            TokenKind::KeywordNil => "NIL",
            TokenKind::KeywordAnd => "AND",
            TokenKind::KeywordOr => "OR",
            TokenKind::KeywordNot => "NOT",
            TokenKind::KeywordObservable => "OBSERVABLE",
            TokenKind::KeywordSubscribe => "SUBSCRIBE",
            TokenKind::KeywordEmit => "EMIT",
            TokenKind::KeywordTransition => "TRANSITION",
            TokenKind::KeywordTimeline => "TIMELINE",
            TokenKind::KeywordVerify => "VERIFY",
            TokenKind::KeywordProof => "PROOF",
            TokenKind::KeywordHasProof => "HAS_PROOF",
            TokenKind::AtSync => "AT_SYNC",
            TokenKind::AtAsync => "AT_ASYNC",
            TokenKind::AtParallel => "AT_PARALLEL",
            TokenKind::AtReactive => "AT_REACTIVE",
            TokenKind::AtTemporal => "AT_TEMPORAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "MODULO",
            TokenKind::Assign => "ASSIGN",
            TokenKind::PlusEqual => "PLUS_ASSIGN",
            TokenKind::MinusEqual => "MINUS_ASSIGN",
            TokenKind::Arrow => "ARROW",
            TokenKind::FatArrow => "FAT_ARROW",
            TokenKind::Bang => "NOT",
            TokenKind::EqualEqual => "EQUAL",
            TokenKind::BangEqual => "NOT_EQUAL",
            TokenKind::LessThan => "LESS",
            TokenKind::LessThanEqual => "LESS_EQUAL",
            TokenKind::GreaterThan => "GREATER",
            TokenKind::GreaterThanEqual => "GREATER_EQUAL",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::DoubleColon => "DOUBLE_COLON",
            TokenKind::Question => "QUESTION",
            TokenKind::LeftParenthesis => "LEFT_PAREN",
            TokenKind::RightParenthesis => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::Hash => "HASH",
            TokenKind::Tag => "TAG",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Comment => "COMMENT",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// Literal payload carried by literal tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(CompactString),
    Bool(bool),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v:?}"),
            Literal::String(v) => write!(f, "{v}"),
            Literal::Bool(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub lexeme: CompactString,
    pub literal: Option<Literal>,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub column: u32,
}

impl Token {
    pub fn integer(&self) -> Option<i64> {
        match self.literal {
            Some(Literal::Integer(v)) => Some(v),
            _ => None,
        }
    }

    pub fn float(&self) -> Option<f64> {
        match self.literal {
            Some(Literal::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn string(&self) -> Option<&CompactString> {
        match self.literal {
            Some(Literal::String(ref v)) => Some(v),
            _ => None,
        }
    }

    pub fn boolean(&self) -> Option<bool> {
        match self.literal {
            Some(Literal::Bool(v)) => Some(v),
            _ => None,
        }
    }
}
