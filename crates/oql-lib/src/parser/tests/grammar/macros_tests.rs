use crate::parser::Parse;

#[test]
fn bbox_macro_filter() {
    let parse = Parse::expect_valid(r#"node["highway"="trunk"]({{bbox}});"#);
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "node"
        SquareFilter
          BracketOpen "["
          Tag
            Key
              Identifier "\"highway\""
            Equals "="
            Value
              Identifier "\"trunk\""
          BracketClose "]"
        RoundFilter
          ParenOpen "("
          Macro
            MacroOpen "{{"
            Identifier "bbox"
            MacroClose "}}"
          ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn geocode_area_statement() {
    let parse = Parse::expect_valid("{{geocodeArea:Japan@ja}}->.japan;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Macro
          MacroOpen "{{"
          Identifier "geocodeArea"
          Colon ":"
          MacroValue
            MacroText "Japan"
            At "@"
            LanguageCode "ja"
          MacroClose "}}"
        Assignment
          Arrow "->"
          Set
            Dot "."
            Variable "japan"
        Semicolon ";"
    "#);
}

#[test]
fn localized_values() {
    let parse = Parse::expect_valid(r#"{{geocodeArea:"Japan"@ja; Italia@es}}->.japan;"#);
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Macro
          MacroOpen "{{"
          Identifier "geocodeArea"
          Colon ":"
          MacroValue
            MacroText "\"Japan\""
            At "@"
            LanguageCode "ja"
          Semicolon ";"
          MacroValue
            MacroText "Italia"
            At "@"
            LanguageCode "es"
          MacroClose "}}"
        Assignment
          Arrow "->"
          Set
            Dot "."
            Variable "japan"
        Semicolon ";"
    "#);
}

#[test]
fn value_with_spaces() {
    let parse = Parse::expect_valid("{{geocodeArea:New York}}->.ny;");
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Query {{geocodeArea}} -> .ny
    ");
}

#[test]
fn macro_selector_with_filters() {
    let parse = Parse::expect_valid("{{style:node}}[amenity];");
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Query {{style}}
        Tag amenity
    ");
}
