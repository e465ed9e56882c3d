use crate::parser::{Parse, parse};
use indoc::indoc;

#[test]
fn trivia_attaches_to_enclosing_node() {
    let parse = Parse::expect_valid("/// Cafes\nnode [ amenity ] ; // done");
    insta::assert_snapshot!(parse.dump_cst_full(), @r#"
    Oql [0..36]
      LineCommentTitle [0..9] "/// Cafes"
      Whitespace [9..10] "\n"
      Query [10..28]
        Keyword [10..14] "node"
        Whitespace [14..15] " "
        SquareFilter [15..26]
          BracketOpen [15..16] "["
          Whitespace [16..17] " "
          Tag [17..24]
            Key [17..24]
              Identifier [17..24] "amenity"
          Whitespace [24..25] " "
          BracketClose [25..26] "]"
        Whitespace [26..27] " "
        Semicolon [27..28] ";"
      Whitespace [28..29] " "
      LineComment [29..36] "// done"
    "#);
}

#[test]
fn title_from_doc_comment() {
    let parse = parse("/// Cafes in Bonn\nnode[amenity=cafe];");
    assert_eq!(parse.title().as_deref(), Some("Cafes in Bonn"));
}

#[test]
fn no_title() {
    assert_eq!(parse("// plain\nnode;").title(), None);
    assert_eq!(parse("///\nnode;").title(), None);
}

#[test]
fn block_comments_between_tokens() {
    let input = indoc! {r#"
    node /* selector */ [ /* key */ "name" ] /* end */ ;
    "#};

    let parse = Parse::expect_valid(input);
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Query node
        Tag name
    ");
}

#[test]
fn comments_inside_blocks() {
    let input = indoc! {r#"
    (
      // first
      node;
      - // second
      way;
    );
    "#};

    let parse = Parse::expect_valid(input);
    assert_eq!(parse.syntax().text().to_string(), input);
    insta::assert_snapshot!(parse.dump_ast(), @r"
    Oql
      Difference
        Query node
        Query way
    ");
}
