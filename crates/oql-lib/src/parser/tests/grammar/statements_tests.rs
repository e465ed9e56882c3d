use crate::parser::{Parse, parse};
use indoc::indoc;

#[test]
fn empty_input() {
    let parse = Parse::expect_valid("");
    insta::assert_snapshot!(parse.dump_cst(), @"Oql");
}

#[test]
fn simple_query() {
    let parse = Parse::expect_valid(r#"node["highway"="trunk"];"#);
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
        Semicolon ";"
    "#);
}

#[test]
fn query_with_input_set_and_assignment() {
    let parse = Parse::expect_valid("way.roads->.result;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Query
        Keyword "way"
        Set
          Dot "."
          Variable "roads"
        Assignment
          Arrow "->"
          Set
            Dot "."
            Variable "result"
        Semicolon ";"
    "#);
}

#[test]
fn settings() {
    let parse = Parse::expect_valid("[out:json][timeout:25];");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Settings
        BracketOpen "["
        SettingName
          Identifier "out"
        Colon ":"
        SettingValue
          Identifier "json"
        BracketClose "]"
        BracketOpen "["
        SettingName
          Identifier "timeout"
        Colon ":"
        SettingValue
          Identifier "25"
        BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn setting_value_macro() {
    let parse = Parse::expect_valid("[bbox:{{bbox}}];");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Settings
        BracketOpen "["
        SettingName
          Identifier "bbox"
        Colon ":"
        SettingValue
          Macro
            MacroOpen "{{"
            Identifier "bbox"
            MacroClose "}}"
        BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn out_with_modifiers() {
    let parse = Parse::expect_valid(".result out body 10;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Out
        Set
          Dot "."
          Variable "result"
        KwOut "out"
        Word "body"
        Number "10"
        Semicolon ";"
    "#);
}

#[test]
fn is_in_with_coordinates() {
    let parse = Parse::expect_valid("is_in(50.7,7.1)->.areas;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      IsIn
        KwIsIn "is_in"
        ParenOpen "("
        Number "50.7"
        Comma ","
        Number "7.1"
        ParenClose ")"
        Assignment
          Arrow "->"
          Set
            Dot "."
            Variable "areas"
        Semicolon ";"
    "#);
}

#[test]
fn recursion_statements() {
    let parse = Parse::expect_valid(".a <; >->.down; <<; .b >>;");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      RecurseUp
        Set
          Dot "."
          Variable "a"
        Lt "<"
        Semicolon ";"
      RecurseDown
        Gt ">"
        Assignment
          Arrow "->"
          Set
            Dot "."
            Variable "down"
        Semicolon ";"
      RecurseUpRelations
        LtLt "<<"
        Semicolon ";"
      RecurseDownRelations
        Set
          Dot "."
          Variable "b"
        GtGt ">>"
        Semicolon ";"
    "#);
}

#[test]
fn foreach_loop() {
    let parse = Parse::expect_valid(".shops foreach->.s(node.s[name];);");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Oql
      Foreach
        Set
          Dot "."
          Variable "shops"
        KwForeach "foreach"
        Assignment
          Arrow "->"
          Set
            Dot "."
            Variable "s"
        ParenOpen "("
        Query
          Keyword "node"
          Set
            Dot "."
            Variable "s"
          SquareFilter
            BracketOpen "["
            Tag
              Key
                Identifier "name"
            BracketClose "]"
          Semicolon ";"
        ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn foreach_semicolon_is_optional() {
    let parse = Parse::expect_valid("foreach(out;) node;");
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Foreach
        Out
      Query node
    ");
}

#[test]
fn program_outline() {
    let input = indoc! {r#"
    node[amenity=cafe]->.cafes;
    .cafes out geom;
    .cafes is_in->.areas;
    is_in(50.7,7.1);
    .cafes foreach->.c(node.c[name];);
    .cafes <;
    >>->.down;
    "#};

    let parse = Parse::expect_valid(input);
    insta::assert_snapshot!(parse.dump_ast(), @r#"
    Oql
      Query node -> .cafes
        Tag amenity = "cafe"
      Out .cafes geom
      IsIn .cafes
      IsIn
      Foreach .cafes
        Query node .c
          Tag name
      RecurseUp .cafes
      RecurseDownRelations -> .down
    "#);
}

#[test]
fn every_element_keyword() {
    for keyword in ["node", "way", "relation", "rel", "nw", "wr", "nr", "nwr", "area", "derived"] {
        let source = format!("{keyword}[name];");
        let parse = parse(&source);
        assert!(parse.is_valid(), "{keyword}: {}", parse.dump_diagnostics());
        assert_eq!(parse.statements().count(), 1);
    }
}

#[test]
fn deterministic() {
    let source = r#"(node["highway"="trunk"]({{bbox}}); - way[!name];)->.x;"#;
    let a = parse(source);
    let b = parse(source);
    assert_eq!(a.as_cst(), b.as_cst());
    assert_eq!(a.diagnostics(), b.diagnostics());
}

#[test]
fn spans_are_nested_and_ordered() {
    let source = r#"node["a"="b"](around.x:10); (way; - rel;); [out:json];"#;
    let parse = Parse::expect_valid(source);
    let root = parse.syntax();
    assert_eq!(usize::from(root.text_range().end()), source.len());
    for node in root.descendants() {
        let range = node.text_range();
        if let Some(parent) = node.parent() {
            assert!(parent.text_range().contains_range(range));
        }
        let mut prev_end = range.start();
        for child in node.children_with_tokens() {
            assert!(child.text_range().start() >= prev_end);
            prev_end = child.text_range().end();
        }
    }
}
