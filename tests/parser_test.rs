use color_eyre::eyre::{eyre, Result};
use proptest::prelude::*;

use myndra::ast::{BinaryOperator, ExpressionKind, StatementKind};
use myndra::lexer::{tokenize, TokenKind};
use myndra::parser::{parse, Parser, ParserErrorKind};

fn check(input: &str, expected: &str, test_name: &str) {
    let (tokens, lexical_errors) = tokenize(input);
    assert!(lexical_errors.is_empty(), "Lexer failed on {test_name}");
    let (program, errors) = parse(tokens);
    assert!(
        errors.is_empty(),
        "Unexpected diagnostics in {test_name}: {errors:?}"
    );
    assert_eq!(program.to_string(), expected, "Failed the test {test_name}");
}

fn diagnostics(input: &str) -> Vec<String> {
    let (tokens, _) = tokenize(input);
    let mut parser = Parser::new(tokens);
    parser.parse_program();
    parser.diagnostics()
}

#[test]
fn smoke_test() {
    check("", "", "smoke");
}

#[test]
fn precedence() {
    check("a + b * 2;", "(expr (+ a (* b 2)))", "mul_over_add");
    check("(a + b) * 2;", "(expr (* (+ a b) 2))", "grouping");
    check("1 - 2 - 3;", "(expr (- (- 1 2) 3))", "left_assoc");
    check(
        "a < b == c >= d;",
        "(expr (== (< a b) (>= c d)))",
        "comparison_under_equality",
    );
    check(
        "a or b and not c;",
        "(expr (or a (and b (not c))))",
        "logical",
    );
    check("x % 3 + -y;", "(expr (+ (% x 3) (- y)))", "modulo_and_negate");
    check("!!+1;", "(expr (not (not (+ 1))))", "unary_chain");
}

#[test]
fn literals() {
    check(
        "1; 2.5; \"hi\\n\"; true; false;",
        "(expr 1)\n(expr 2.5)\n(expr \"hi\\n\")\n(expr true)\n(expr false)",
        "literals",
    );
}

#[test]
fn assignment_is_right_associative() {
    check("a = b = 3;", "(expr (= a (= b 3)))", "assignment");
}

#[test]
fn invalid_assignment_target() {
    let (tokens, _) = tokenize("1 = 2;");
    let (program, errors) = parse(tokens);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParserErrorKind::InvalidAssignmentTarget);
    assert_eq!(
        errors[0].to_string(),
        "Line 1, Column 3: Invalid assignment target (got '=')"
    );
    assert_eq!(program.to_string(), "(expr 1)");
}

#[test]
fn postfix_chains() {
    check(
        "f(1, g(2))[0].name;",
        "(expr (. (index (call f 1 (call g 2)) 0) name))",
        "postfix",
    );
    check("f();", "(expr (call f))", "empty_call");
}

#[test]
fn context_conditional_uses_two_equals() {
    check(
        "log(x) if env == == \"dev\";",
        "(expr (context (call log x) \"dev\"))",
        "context_conditional",
    );
}

#[test]
fn context_conditional_with_single_equals() {
    let found = diagnostics("log(x) if env == \"dev\";");
    assert_eq!(
        found,
        vec![
            "Line 1, Column 18: Expected '==' in context conditional (got '\"dev\"')".to_string()
        ]
    );
}

#[test]
fn context_conditional_without_string() -> Result<()> {
    let (tokens, _) = tokenize("x if env == == 1;");
    let (program, errors) = parse(tokens);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].kind, ParserErrorKind::ExpectedContextString);
    let statement = program
        .statements
        .first()
        .ok_or_else(|| eyre!("no statements"))?;
    assert!(matches!(
        statement.kind,
        StatementKind::Expression(ref e) if e.kind == ExpressionKind::Identifier("x".into())
    ));
    assert_eq!(program.to_string(), "(expr x)\n(expr 1)");
    Ok(())
}

#[test]
fn statements() {
    check("let x = 1;", "(let x 1)", "let");
    check("let mut y: int;", "(let mut y: int)", "let_mut_typed");
    check(
        "fn add(a: int, b: int) -> int { return a + b; }",
        "(fn add (a: int b: int) -> int (block (return (+ a b))))",
        "function",
    );
    check("fn noop() {}", "(fn noop () (block))", "empty_function");
    check(
        "if x { print(1); } else print(2);",
        "(if x (block (expr (call print 1))) (expr (call print 2)))",
        "if_else",
    );
    check(
        "while i < 3 i = i + 1;",
        "(while (< i 3) (expr (= i (+ i 1))))",
        "while",
    );
    check(
        "for i in 0..10 { print(i); }",
        "(for i 0 10 (block (expr (call print i))))",
        "for",
    );
    check("return;", "(return)", "bare_return");
}

#[test]
fn newlines_between_statements_are_skipped() {
    check(
        "let a = 1;\n\n{\n  print(a);\n}\n",
        "(let a 1)\n(block (expr (call print a)))",
        "newlines",
    );
}

#[test]
fn missing_semicolon_does_not_abort() {
    let (tokens, _) = tokenize("let a = 1 let b = 2;");
    let (program, errors) = parse(tokens);
    assert_eq!(
        errors
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>(),
        vec!["Line 1, Column 11: Expect ';' after variable declaration (got 'let')".to_string()]
    );
    assert_eq!(program.to_string(), "(let a 1)\n(let b 2)");
}

#[test]
fn missing_tokens_are_reported_in_order() {
    let found = diagnostics("fn f(a int {}");
    assert_eq!(
        found,
        vec![
            "Line 1, Column 8: Expect ':' after parameter name (got 'int')".to_string(),
            "Line 1, Column 12: Expect ')' after parameters (got '{')".to_string(),
        ]
    );
}

#[test]
fn missing_type_cascades() {
    let found = diagnostics("fn f(a: ) {}");
    assert_eq!(
        found,
        vec!["Line 1, Column 9: Expected type name (got ')')".to_string()]
    );
    let found = diagnostics("let v: = 1;");
    assert_eq!(
        found,
        vec!["Line 1, Column 8: Expected type name (got '=')".to_string()]
    );
}

#[test]
fn synchronize_skips_to_next_declaration() {
    let (tokens, _) = tokenize("let x = ; let y = 2; print(y);");
    let (program, errors) = parse(tokens);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParserErrorKind::ExpectedExpression);
    assert_eq!(
        errors[0].to_string(),
        "Line 1, Column 9: Expect expression (got ';')"
    );
    assert_eq!(program.to_string(), "(let y 2)\n(expr (call print y))");
}

#[test]
fn recovery_inside_a_block_keeps_the_block() {
    let (tokens, _) = tokenize("{ print(); ) ; let z = 3; }");
    let (program, errors) = parse(tokens);
    assert_eq!(errors.len(), 1);
    assert_eq!(program.to_string(), "(block (expr (call print)) (let z 3))");
}

#[test]
fn error_at_end_of_input() -> Result<()> {
    let (tokens, _) = tokenize("print(1 +");
    let (program, errors) = parse(tokens);
    assert!(program.statements.is_empty());
    let error = errors.first().ok_or_else(|| eyre!("expected a diagnostic"))?;
    assert_eq!(error.kind, ParserErrorKind::ExpectedExpression);
    assert_eq!(error.lexeme, "");
    Ok(())
}

#[test]
fn partial_parse_entry_points() -> Result<()> {
    let (tokens, _) = tokenize("a = 1 + 2");
    let mut parser = Parser::new(tokens);
    let expression = parser
        .parse_expression()
        .ok_or_else(|| eyre!("expression failed to parse"))?;
    assert!(!parser.has_errors());
    assert!(matches!(
        expression.kind,
        ExpressionKind::Binary {
            operator: BinaryOperator::Assign,
            ..
        }
    ));
    assert_eq!((expression.position.line, expression.position.column), (1, 3));

    let (tokens, _) = tokenize("\n\nlet q = 0; print(q);");
    let mut parser = Parser::new(tokens);
    let first = parser
        .parse_statement()
        .ok_or_else(|| eyre!("statement failed to parse"))?;
    assert_eq!(first.to_string(), "(let q 0)");
    assert_eq!((first.position.line, first.position.column), (3, 1));
    let second = parser
        .parse_statement()
        .ok_or_else(|| eyre!("statement failed to parse"))?;
    assert_eq!(second.to_string(), "(expr (call print q))");
    assert!(parser.parse_statement().is_none());
    Ok(())
}

fn expression_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z][a-z0-9]{0,4}".prop_filter("keywords are not identifiers", |s| {
            tokenize(s).0.first().map(|token| token.kind) == Some(TokenKind::Ident)
        }),
        (0i64..1000).prop_map(|n| n.to_string()),
        Just("true".to_string()),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), "[-+*/%<>]|==|!=|and|or", inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("not {e}")),
            inner.prop_map(|e| format!("f({e})")),
        ]
    })
}

proptest! {
    #[test]
    fn generated_expressions_parse_cleanly(expression in expression_strategy()) {
        let source = format!("{expression};");
        let (tokens, lexical_errors) = tokenize(&source);
        prop_assert!(lexical_errors.is_empty());
        let (program, errors) = parse(tokens);
        prop_assert!(errors.is_empty(), "{:?}", errors);
        prop_assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn parsing_is_deterministic(source in "\\PC*") {
        let (tokens, _) = tokenize(&source);
        let first = parse(tokens.clone());
        let second = parse(tokens);
        prop_assert_eq!(first, second);
    }
}
