use crate::parser::{Parse, parse};

#[test]
fn missing_bracket() {
    let res = Parse::expect_invalid("node[highway");
    insta::assert_snapshot!(res, @"error at 4..12: missing closing `]` (related: bracket started here at 4..5)");
}

#[test]
fn missing_paren_in_block() {
    let res = Parse::expect_invalid("(node;");
    insta::assert_snapshot!(res, @"error at 0..6: missing closing `)` (related: block started here at 0..1)");
}

#[test]
fn missing_paren_keeps_union() {
    let parse = parse("(node;way;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Union
        ParenOpen "("
        Query
          Keyword "node"
          Semicolon ";"
        Query
          Keyword "way"
          Semicolon ";"
    "#);
}

#[test]
fn missing_macro_close() {
    let res = Parse::expect_invalid("node({{bbox);");
    insta::assert_snapshot!(res, @"error at 5..11: missing closing `}}` (related: macro started here at 5..7)");
}

#[test]
fn unterminated_string() {
    let res = Parse::expect_invalid(r#"node["highway];"#);
    insta::assert_snapshot!(res, @"error at 5..13: unterminated string");
}

#[test]
fn unclosed_round_filter() {
    let parse = parse("node(around.a:10;way;");
    assert!(!parse.is_valid());
    assert_eq!(parse.statements().count(), 2);
    insta::assert_snapshot!(parse.dump_diagnostics(), @"error at 4..16: missing closing `)` (related: block started here at 4..5)");
}
