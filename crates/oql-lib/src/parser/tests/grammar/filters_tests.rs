use crate::parser::Parse;

#[test]
fn key_exists() {
    let parse = Parse::expect_valid("way[highway];");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "way"
        SquareFilter
          BracketOpen "["
          Tag
            Key
              Identifier "highway"
          BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn key_absent() {
    let parse = Parse::expect_valid("node[!name];");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "node"
        SquareFilter
          BracketOpen "["
          Tag
            Negation "!"
            Key
              Identifier "name"
          BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn not_equals() {
    let parse = Parse::expect_valid("node[access!=private];");
    insta::assert_snapshot!(parse.dump_ast(), @r#"
    Oql
      Query node
        Tag access != "private"
    "#);
}

#[test]
fn value_regex_with_flag() {
    let parse = Parse::expect_valid(r#"way[name~"^Main",i];"#);
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "way"
        SquareFilter
          BracketOpen "["
          Tag
            Key
              Identifier "name"
            Tilde "~"
            Regex "\"^Main\""
            Comma ","
            Identifier "i"
          BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn key_and_value_regex() {
    let parse = Parse::expect_valid(r#"way[~"^addr:"~"."];"#);
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "way"
        SquareFilter
          BracketOpen "["
          Tag
            Tilde "~"
            Regex "\"^addr:\""
            Tilde "~"
            Regex "\".\""
          BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn several_tag_filters() {
    let parse = Parse::expect_valid(r#"nwr[amenity=restaurant]["cuisine"!~"pizza"][!"opening_hours"];"#);
    insta::assert_snapshot!(parse.dump_ast(), @r#"
    Oql
      Query nwr
        Tag amenity = "restaurant"
        Tag cuisine !~ "pizza"
        Tag !opening_hours
    "#);
}

#[test]
fn single_quoted_strings() {
    let parse = Parse::expect_valid("node['name'='Café Central'];");
    insta::assert_snapshot!(parse.dump_ast(), @r#"
    Oql
      Query node
        Tag name = "Café Central"
    "#);
}

#[test]
fn around_set() {
    let parse = Parse::expect_valid(r#" way["asdllsdf"](around.hey:8); "#);
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "way"
        SquareFilter
          BracketOpen "["
          Tag
            Key
              Identifier "\"asdllsdf\""
          BracketClose "]"
        RoundFilter
          ParenOpen "("
          Around
            KwAround "around"
            Set
              Dot "."
              Variable "hey"
            Colon ":"
            Radius
              Number "8"
          ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn around_coordinates() {
    let parse = Parse::expect_valid("node(around:100,50.7,7.1);");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "node"
        RoundFilter
          ParenOpen "("
          Around
            KwAround "around"
            Colon ":"
            Radius
              Number "100"
            Comma ","
            Number "50.7"
            Comma ","
            Number "7.1"
          ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn bbox() {
    let parse = Parse::expect_valid("node(50.6,7.0,50.8,7.2);");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "node"
        RoundFilter
          ParenOpen "("
          Bbox
            Number "50.6"
            Comma ","
            Number "7.0"
            Comma ","
            Number "50.8"
            Comma ","
            Number "7.2"
          ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn area_filter() {
    let parse = Parse::expect_valid("node[shop](area.city);");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "node"
        SquareFilter
          BracketOpen "["
          Tag
            Key
              Identifier "shop"
          BracketClose "]"
        RoundFilter
          ParenOpen "("
          Area
            Keyword "area"
            Set
              Dot "."
              Variable "city"
          ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn filters_in_any_order() {
    let parse = Parse::expect_valid("node({{bbox}})[amenity](area)[name];");
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Query node
        Tag amenity
        Tag name
        Filter ({{bbox}})
        Filter (area)
    ");
}
