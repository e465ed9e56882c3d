use crate::parser::Parse;
use indoc::indoc;

#[test]
fn union() {
    let parse = Parse::expect_valid("(node;way;);");
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
        ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn difference() {
    let parse = Parse::expect_valid("(node;-way;);");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Difference
        ParenOpen "("
        Query
          Keyword "node"
          Semicolon ";"
        Minus "-"
        Query
          Keyword "way"
          Semicolon ";"
        ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn difference_ignores_whitespace_around_minus() {
    for source in ["(node;-way;);", "(node; - way;);", "(node;\n  -\n  way;\n);"] {
        let parse = Parse::expect_valid(source);
        assert_eq!(
            parse.dump_ast(),
            indoc! {"
            Oql
              Difference
                Query node
                Query way
            "}
        );
    }
}

#[test]
fn union_with_filters() {
    let input = indoc! {r#"
    (
        way["highway"~"trunk|hey"]({{bbox}});
        way[~"highway"~"trunk|hey"]({{bbox}});
    );
    "#};

    let parse = Parse::expect_valid(input);
    insta::assert_snapshot!(parse.dump_ast(), @r#"
    Oql
      Union
        Query way
          Tag highway ~ "trunk|hey"
          Filter ({{bbox}})
        Query way
          Tag ~ "highway" ~ "trunk|hey"
          Filter ({{bbox}})
    "#);
}

#[test]
fn difference_with_filters() {
    let input = indoc! {r#"
    (
        way["highway"~"trunk|hey"]({{bbox}});
        - way[~"highway"~"trunk|hey"]({{bbox}});
    );
    "#};

    let parse = Parse::expect_valid(input);
    insta::assert_snapshot!(parse.dump_ast(), @r#"
    Oql
      Difference
        Query way
          Tag highway ~ "trunk|hey"
          Filter ({{bbox}})
        Query way
          Tag ~ "highway" ~ "trunk|hey"
          Filter ({{bbox}})
    "#);
}

#[test]
fn nested_blocks_with_assignment() {
    let input = indoc! {r#"
    (
      (node[amenity]; way[amenity];)->.a;
      (.a; - node[amenity=bench];);
    )->.result;
    "#};

    let parse = Parse::expect_valid(input);
    insta::assert_snapshot!(parse.dump_ast(), @r#"
    Oql
      Union -> .result
        Union -> .a
          Query node
            Tag amenity
          Query way
            Tag amenity
        Difference
          Query .a
          Query node
            Tag amenity = "bench"
    "#);
}

#[test]
fn single_statement_union() {
    let parse = Parse::expect_valid("(node;);");
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Union
        Query node
    ");
}
