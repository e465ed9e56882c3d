use crate::diagnostics::DiagnosticKind;
use crate::parser::{Parse, parse};

#[test]
fn garbage_between_statements() {
    let parse = parse("node; $$ way;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "node"
        Semicolon ";"
      Error
        Garbage "$$"
      Query
        Keyword "way"
        Semicolon ";"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 6..8: expected a statement");
}

#[test]
fn stray_word_before_semicolon() {
    let parse = parse("node foo;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "node"
        Error
          Word "foo"
        Semicolon ";"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 5..8: expected `;`");
}

#[test]
fn statement_recovery_consumes_semicolon() {
    let parse = parse("foo bar; way;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Error
        Word "foo"
        Word "bar"
        Semicolon ";"
      Query
        Keyword "way"
        Semicolon ";"
    "#);
}

#[test]
fn empty_group() {
    let parse = parse("();");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Group
        ParenOpen "("
        ParenClose ")"
        Semicolon ";"
    "#);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 0..2: empty `()` block (hint: put at least one statement between `(` and `)`)");
}

#[test]
fn stray_minus_in_union() {
    let res = Parse::expect_invalid("(node; way; - rel;);");
    insta::assert_snapshot!(res, @"error at 12..13: unexpected token: `-` must follow the first statement of a difference");
}

#[test]
fn difference_with_three_statements() {
    let parse = parse("(node; - way; rel;);");
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 14..17: unexpected token: a difference takes exactly two statements");
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Difference
        Query node
        Query way
    ");
}

#[test]
fn assignment_without_set() {
    let res = Parse::expect_invalid("node->;");
    insta::assert_snapshot!(res, @"error at 6..7: expected set name: `->` must be followed by `.name` (hint: e.g., `.result`)");
}

#[test]
fn missing_tag_value() {
    let res = Parse::expect_invalid("node[highway=];");
    insta::assert_snapshot!(res, @"error at 13..14: expected tag value");
}

#[test]
fn missing_round_filter_content() {
    let res = Parse::expect_invalid("node(foo);");
    insta::assert_snapshot!(res, @"error at 5..8: expected filter");
}

#[test]
fn colon_keys_stay_in_tag_mode() {
    let parse = Parse::expect_valid(r#"node["addr:street"][addr:city];"#);
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Query node
        Tag addr:street
        Tag addr:city
    ");
}

#[test]
fn recursion_limit() {
    let source = "(((node;);););";
    let parse = crate::parser::parse_with(
        source,
        crate::parser::ParserConfig::default().with_recursion_limit(2),
    )
    .unwrap();
    assert!(
        parse
            .diagnostics()
            .iter()
            .any(|d| d.kind() == DiagnosticKind::RecursionLimit)
    );
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn deep_nesting_within_limit() {
    let source = format!("{}node;{}", "(".repeat(50), ");".repeat(50));
    let parse = Parse::expect_valid(&source);
    assert_eq!(parse.statements().count(), 1);
}

#[test]
fn exec_fuel_exhausted() {
    let result = crate::parser::parse_with(
        "node; way; rel;",
        crate::parser::ParserConfig::default().with_exec_fuel(Some(2)),
    );
    assert!(matches!(result, Err(crate::Error::ExecFuelExhausted)));
}

#[test]
fn exec_fuel_sufficient() {
    let result = crate::parser::parse_with(
        "node;",
        crate::parser::ParserConfig::default().with_exec_fuel(Some(100)),
    );
    assert!(result.is_ok());
}
