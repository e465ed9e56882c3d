//! Syntax highlighting: display categories for CST kinds.
//!
//! A token takes its own category when it has one, otherwise the category of
//! the nearest styled ancestor node. Whitespace is never styled.

use rowan::TextRange;

use crate::parser::{Parse, SyntaxKind, SyntaxToken};

/// Display category for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightTag {
    Keyword,
    String,
    Regexp,
    Number,
    VariableName,
    Operator,
    Paren,
    SquareBracket,
    Brace,
    Meta,
    LineComment,
    DocComment,
    Invalid,
}

/// One styled token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct HighlightSpan {
    #[serde(serialize_with = "serialize_range")]
    pub range: TextRange,
    pub tag: HighlightTag,
}

/// Category for a token or node kind, `None` for kinds that inherit.
pub fn highlight_tag(kind: SyntaxKind) -> Option<HighlightTag> {
    use SyntaxKind::*;

    let tag = match kind {
        Keyword | KwOut | KwIsIn | KwForeach | KwAround | LanguageCode => HighlightTag::Keyword,
        Identifier | MacroValue => HighlightTag::String,
        Regex => HighlightTag::Regexp,
        Number => HighlightTag::Number,
        Set => HighlightTag::VariableName,
        Arrow | At | Minus | Lt | LtLt | Gt | GtGt => HighlightTag::Operator,
        Tag | ParenOpen | ParenClose => HighlightTag::Paren,
        BracketOpen | BracketClose => HighlightTag::SquareBracket,
        MacroOpen | MacroClose => HighlightTag::Brace,
        Macro => HighlightTag::Meta,
        LineComment | BlockComment => HighlightTag::LineComment,
        LineCommentTitle => HighlightTag::DocComment,
        Garbage | Error => HighlightTag::Invalid,
        _ => return None,
    };
    Some(tag)
}

/// One span per styled token, in source order.
pub fn highlight(parse: &Parse) -> Vec<HighlightSpan> {
    parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|el| el.into_token())
        .filter(|t| t.kind() != SyntaxKind::Whitespace)
        .filter_map(|t| {
            let tag = token_tag(&t)?;
            Some(HighlightSpan {
                range: t.text_range(),
                tag,
            })
        })
        .collect()
}

fn token_tag(token: &SyntaxToken) -> Option<HighlightTag> {
    highlight_tag(token.kind())
        .or_else(|| token.parent_ancestors().find_map(|n| highlight_tag(n.kind())))
}

fn serialize_range<S: serde::Serializer>(range: &TextRange, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeTuple;
    let mut tuple = s.serialize_tuple(2)?;
    tuple.serialize_element(&u32::from(range.start()))?;
    tuple.serialize_element(&u32::from(range.end()))?;
    tuple.end()
}
