use crate::parser::{Parse, parse};

#[test]
fn missing_semicolon() {
    let res = Parse::expect_invalid("node");
    insta::assert_snapshot!(res, @"error at 4..4: missing `;` after statement (fix: add `;`)");
}

#[test]
fn missing_semicolon_fix_inserts_terminator() {
    let source = "node[amenity]\nway;";
    let parse = parse(source);
    let diag = parse
        .diagnostics()
        .iter()
        .next()
        .expect("missing semicolon reported");
    assert_eq!(diag.apply_fix(source, 0).as_deref(), Some("node[amenity];\nway;"));
}

#[test]
fn open_bracket() {
    let res = Parse::expect_invalid("node[");
    insta::assert_snapshot!(res, @"error at 5..5: expected tag key");
}

#[test]
fn open_value() {
    let res = Parse::expect_invalid("node[highway=");
    insta::assert_snapshot!(res, @"error at 13..13: expected tag value");
}

#[test]
fn open_macro_value() {
    let res = Parse::expect_invalid("{{geocodeArea:");
    insta::assert_snapshot!(res, @"error at 0..14: missing closing `}}` (related: macro started here at 0..2)");
}

#[test]
fn dangling_set() {
    let res = Parse::expect_invalid(".a");
    insta::assert_snapshot!(res, @"error at 0..1: expected a statement");
}

#[test]
fn open_difference() {
    let parse = parse("(node; -");
    assert!(!parse.is_valid());
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Difference
        Query node
    ");
}

#[test]
fn statements_after_error_still_parse() {
    let parse = parse("node[; way[highway]; rel;");
    let kinds: Vec<_> = parse.statements().map(|s| s.as_cst().kind()).collect();
    assert_eq!(kinds.len(), 3);
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Query node
        Tag?
      Query way
        Tag highway
      Query rel
    ");
}
