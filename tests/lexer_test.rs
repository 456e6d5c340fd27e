use color_eyre::eyre::Result;
use proptest::prelude::*;

use myndra::lexer::{
    formatter::{BasicFormatter, TokenFormatter},
    tokenize, Lexer, LexicalErrorKind, Literal, TokenKind,
};

fn check(input: &str, expected: &str, test_name: &str) {
    let mut lexer = Lexer::new(input);
    let formatter = BasicFormatter;
    let mut buffer = String::new();
    for token in lexer.tokenize() {
        buffer.push_str(&formatter.format(&token));
        buffer.push('\n');
    }
    for error in lexer.errors() {
        buffer.push_str(&formatter.format_lexical_error(error));
        buffer.push('\n');
    }

    assert_eq!(buffer, expected, "Failed the test {test_name}");
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).0.into_iter().map(|t| t.kind).collect()
}

#[test]
fn smoke_test() {
    check("", "EOF  null\n", "smoke");
}

#[test]
fn variable_declaration() {
    check(
        "let x = 42 + 3.14",
        "LET let null\n\
         IDENTIFIER x null\n\
         ASSIGN = null\n\
         INTEGER 42 42\n\
         PLUS + null\n\
         FLOAT 3.14 3.14\n\
         EOF  null\n",
        "variable_declaration",
    );
}

#[test]
fn keywords_and_booleans() {
    assert_eq!(
        kinds("let mut fn if else while for in return nil and or not has_proof"),
        vec![
            TokenKind::KeywordLet,
            TokenKind::KeywordMut,
            TokenKind::KeywordFn,
            TokenKind::KeywordIf,
            TokenKind::KeywordElse,
            TokenKind::KeywordWhile,
            TokenKind::KeywordFor,
            TokenKind::KeywordIn,
            TokenKind::KeywordReturn,
            TokenKind::KeywordNil,
            TokenKind::KeywordAnd,
            TokenKind::KeywordOr,
            TokenKind::KeywordNot,
            TokenKind::KeywordHasProof,
            TokenKind::Eof,
        ]
    );

    let (tokens, errors) = tokenize("true false truth");
    assert!(errors.is_empty());
    assert_eq!(tokens[0].literal, Some(Literal::Bool(true)));
    assert_eq!(tokens[1].literal, Some(Literal::Bool(false)));
    assert_eq!(tokens[2].kind, TokenKind::Ident);
}

#[test]
fn annotations() {
    assert_eq!(
        kinds("@sync @async @parallel @reactive @temporal"),
        vec![
            TokenKind::AtSync,
            TokenKind::AtAsync,
            TokenKind::AtParallel,
            TokenKind::AtReactive,
            TokenKind::AtTemporal,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unknown_annotation_stops_the_stream() {
    check(
        "@fast x",
        "ERROR @fast null\n\
         EOF  null\n\
         Line 1, Column 1: Unknown annotation: @fast\n",
        "unknown_annotation",
    );
}

#[test]
fn unexpected_character_stops_the_stream() {
    let (tokens, errors) = tokenize("a $ b");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Ident, TokenKind::Error, TokenKind::Eof]
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "Line 1, Column 3: Unexpected character: $");
}

#[test]
fn operators_and_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] , . ; ? + - * / % ! = < > : += -= -> => == != <= >= ::"),
        vec![
            TokenKind::LeftParenthesis,
            TokenKind::RightParenthesis,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Semicolon,
            TokenKind::Question,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Bang,
            TokenKind::Assign,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::Colon,
            TokenKind::PlusEqual,
            TokenKind::MinusEqual,
            TokenKind::Arrow,
            TokenKind::FatArrow,
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::LessThanEqual,
            TokenKind::GreaterThanEqual,
            TokenKind::DoubleColon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn bang_and_not_share_a_display_name() {
    assert_eq!(TokenKind::Bang.to_string(), TokenKind::KeywordNot.to_string());
}

#[test]
fn string_escapes() {
    let (tokens, errors) = tokenize(r#""a\n\t\r\\\"b""#);
    assert!(errors.is_empty());
    assert_eq!(
        tokens[0].literal,
        Some(Literal::String("a\n\t\r\\\"b".into()))
    );
    assert_eq!(tokens[0].lexeme, r#""a\n\t\r\\\"b""#);
}

#[test]
fn unknown_escape_is_kept_and_reported() {
    let (tokens, errors) = tokenize(r#"print("\w") ;"#);
    assert_eq!(tokens[2].literal, Some(Literal::String("w".into())));
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(tokens.len(), 6);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexicalErrorKind::UnknownEscape('w'));
    assert_eq!(errors[0].to_string(), "Line 1, Column 7: Unknown escape sequence: \\w");
}

#[test]
fn unterminated_string() {
    let (tokens, errors) = tokenize("let s = \"abc");
    assert_eq!(tokens[3].kind, TokenKind::Error);
    assert_eq!(tokens[3].lexeme, "\"abc");
    assert_eq!(tokens.len(), 5);
    assert_eq!(errors[0].to_string(), "Line 1, Column 9: Unterminated string");
}

#[test]
fn strings_span_lines() {
    let (tokens, errors) = tokenize("\"a\nb\" x");
    assert!(errors.is_empty());
    assert_eq!(tokens[0].literal, Some(Literal::String("a\nb".into())));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 4));
}

#[test]
fn tags_and_hash() {
    let (tokens, _) = tokenize("#pure:v2 # x");
    assert_eq!(tokens[0].kind, TokenKind::Tag);
    assert_eq!(tokens[0].lexeme, "#pure:v2");
    assert_eq!(tokens[0].literal, None);
    assert_eq!(tokens[1].kind, TokenKind::Hash);
    assert_eq!(tokens[2].kind, TokenKind::Ident);
}

#[test]
fn comments_are_dropped() {
    assert_eq!(
        kinds("a // trailing\nb /* inline */ c"),
        vec![
            TokenKind::Ident,
            TokenKind::Newline,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
    assert_eq!(kinds("x /* never closed"), vec![TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn block_comments_track_lines() {
    let (tokens, _) = tokenize("/* one\ntwo\n */ y");
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!((tokens[0].line, tokens[0].column), (3, 5));
}

#[test]
fn next_token_yields_comments() {
    let mut lexer = Lexer::new("// note");
    assert_eq!(lexer.next_token().kind, TokenKind::Comment);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn range_dots_are_not_part_of_numbers() {
    assert_eq!(
        kinds("1..10 2.5 3."),
        vec![
            TokenKind::Integer,
            TokenKind::Dot,
            TokenKind::Dot,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::Integer,
            TokenKind::Dot,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn integer_out_of_range() {
    let (tokens, errors) = tokenize("9223372036854775807 9223372036854775808");
    assert_eq!(tokens[0].literal, Some(Literal::Integer(i64::MAX)));
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(errors[0].kind, LexicalErrorKind::IntegerOutOfRange);
}

#[test]
fn newlines_and_positions() -> Result<()> {
    let (tokens, errors) = tokenize("let a = 1;\n  print(a);");
    assert!(errors.is_empty());
    let newline = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Newline)
        .ok_or_else(|| color_eyre::eyre::eyre!("no newline token"))?;
    assert_eq!((tokens[newline].line, tokens[newline].column), (1, 11));
    let print = &tokens[newline + 1];
    assert_eq!(print.lexeme, "print");
    assert_eq!((print.line, print.column), (2, 3));
    Ok(())
}

#[test]
fn diagnostics_are_formatted_strings() {
    let mut lexer = Lexer::new("\"\\q\"");
    lexer.tokenize();
    assert!(lexer.has_errors());
    assert_eq!(
        lexer.diagnostics(),
        vec!["Line 1, Column 1: Unknown escape sequence: \\q".to_string()]
    );
}

// Property-based tests

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just(",".to_string()),
        Just(".".to_string()),
        Just(";".to_string()),
        Just("?".to_string()),
        Just("-".to_string()),
        Just("+".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("%".to_string()),
        Just("!".to_string()),
        Just("!=".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
        Just(">".to_string()),
        Just(">=".to_string()),
        Just("+=".to_string()),
        Just("-=".to_string()),
        Just("->".to_string()),
        Just("=>".to_string()),
        Just(":".to_string()),
        Just("::".to_string()),
        Just("#".to_string()),
    ]
}

fn numeric_literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,18}".prop_map(|s| s),
        "[0-9]{1,6}\\.[0-9]{1,6}".prop_map(|s| s)
    ]
}

fn string_literal_strategy() -> impl Strategy<Value = String> {
    "[^\"\\\\]*".prop_map(|s: String| format!("\"{}\"", s))
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]*".prop_map(|s: String| s)
}

fn tag_strategy() -> impl Strategy<Value = String> {
    "#[a-z][a-z0-9_:]*".prop_map(|s: String| s)
}

fn annotation_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("@sync".to_string()),
        Just("@async".to_string()),
        Just("@parallel".to_string()),
        Just("@reactive".to_string()),
        Just("@temporal".to_string()),
    ]
}

fn comment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[^\n]*".prop_map(|s: String| format!("//{}\n", s)),
        "[a-z \n]*".prop_map(|s: String| format!("/*{}*/", s)),
    ]
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        symbol_strategy(),
        numeric_literal_strategy(),
        string_literal_strategy(),
        identifier_strategy(),
        tag_strategy(),
        annotation_strategy(),
    ]
}

fn token_sequence_without_comments_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(token_strategy(), MIN_TOKEN_COUNT..MAX_TOKEN_COUNT)
}

fn token_sequence_with_comments_strategy() -> impl Strategy<Value = String> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![token_strategy(), comment_strategy()],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
    .prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #[test]
    fn lexer_handles_valid_tokens_without_comments(
        input in token_sequence_without_comments_strategy()
    ) {
        // Add 1 to include EOF token
        let expected_num_tokens = input.len() + 1;
        let input = input.join(" ");
        let (tokens, errors) = tokenize(&input);
        prop_assert!(errors.is_empty());
        prop_assert_eq!(tokens.len(), expected_num_tokens);
    }

    #[test]
    fn lexemes_reproduce_the_source(input in token_sequence_without_comments_strategy()) {
        let input = input.join(" ");
        let (tokens, errors) = tokenize(&input);
        prop_assert!(errors.is_empty());

        let mut rebuilt = String::new();
        let mut cursor = 0;
        for token in tokens.iter() {
            let gap = &input[cursor..token.span.start as usize];
            prop_assert!(gap.chars().all(char::is_whitespace));
            rebuilt.push_str(gap);
            prop_assert_eq!(&input[token.span.range()], token.lexeme.as_str());
            rebuilt.push_str(&token.lexeme);
            cursor = token.span.end();
        }
        rebuilt.push_str(&input[cursor..]);
        prop_assert_eq!(rebuilt, input);
    }

    #[test]
    fn lexer_handles_valid_tokens_with_comments(input in token_sequence_with_comments_strategy()) {
        let (tokens, errors) = tokenize(&input);
        prop_assert!(errors.is_empty());
        prop_assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn tokenizing_is_deterministic(input in "\\PC*") {
        let first = tokenize(&input);
        let second = tokenize(&input);
        prop_assert_eq!(first, second);
    }
}
