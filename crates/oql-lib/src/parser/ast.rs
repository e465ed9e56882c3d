//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens in the parser.
//! Accessors return `Option` because recovered trees may lack any child.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};
use super::lexer::unquote;

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Oql, Oql);
ast_node!(Query, Query);
ast_node!(SquareFilter, SquareFilter);
ast_node!(Tag, Tag);
ast_node!(Key, Key);
ast_node!(Value, Value);
ast_node!(RoundFilter, RoundFilter);
ast_node!(Around, Around);
ast_node!(Area, Area);
ast_node!(Bbox, Bbox);
ast_node!(Macro, Macro);
ast_node!(MacroValue, MacroValue);
ast_node!(Set, Set);
ast_node!(Assignment, Assignment);
ast_node!(Union, Union);
ast_node!(Difference, Difference);
ast_node!(Group, Group);
ast_node!(Settings, Settings);
ast_node!(Foreach, Foreach);
ast_node!(IsIn, IsIn);
ast_node!(Out, Out);

/// Any of the four recursion statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recurse(SyntaxNode);

impl Recurse {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        matches!(
            node.kind(),
            SyntaxKind::RecurseUp
                | SyntaxKind::RecurseDown
                | SyntaxKind::RecurseUpRelations
                | SyntaxKind::RecurseDownRelations
        )
        .then(|| Self(node))
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn input_set(&self) -> Option<Set> {
        child(&self.0)
    }

    pub fn assignment(&self) -> Option<Assignment> {
        child(&self.0)
    }
}

/// Top-level or block-level statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Query(Query),
    Union(Union),
    Difference(Difference),
    Group(Group),
    Settings(Settings),
    Foreach(Foreach),
    IsIn(IsIn),
    Out(Out),
    Recurse(Recurse),
}

impl Statement {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Query => Query::cast(node).map(Statement::Query),
            SyntaxKind::Union => Union::cast(node).map(Statement::Union),
            SyntaxKind::Difference => Difference::cast(node).map(Statement::Difference),
            SyntaxKind::Group => Group::cast(node).map(Statement::Group),
            SyntaxKind::Settings => Settings::cast(node).map(Statement::Settings),
            SyntaxKind::Foreach => Foreach::cast(node).map(Statement::Foreach),
            SyntaxKind::IsIn => IsIn::cast(node).map(Statement::IsIn),
            SyntaxKind::Out => Out::cast(node).map(Statement::Out),
            _ => Recurse::cast(node).map(Statement::Recurse),
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Statement::Query(n) => n.as_cst(),
            Statement::Union(n) => n.as_cst(),
            Statement::Difference(n) => n.as_cst(),
            Statement::Group(n) => n.as_cst(),
            Statement::Settings(n) => n.as_cst(),
            Statement::Foreach(n) => n.as_cst(),
            Statement::IsIn(n) => n.as_cst(),
            Statement::Out(n) => n.as_cst(),
            Statement::Recurse(n) => n.as_cst(),
        }
    }

    /// The statement ends with its own `;`.
    pub fn is_terminated(&self) -> bool {
        last_token_is(self.as_cst(), SyntaxKind::Semicolon)
    }
}

fn child<N: AstCast>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast_node)
}

fn children<N: AstCast>(node: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    node.children().filter_map(N::cast_node)
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|el| el.into_token())
        .find(|t| t.kind() == kind)
}

fn last_token_is(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.last_token().is_some_and(|t| t.kind() == kind)
}

/// Bridges the per-type `cast` functions for the generic helpers.
trait AstCast: Sized {
    fn cast_node(node: SyntaxNode) -> Option<Self>;
}

macro_rules! ast_cast {
    ($($name:ident),* $(,)?) => {
        $(impl AstCast for $name {
            fn cast_node(node: SyntaxNode) -> Option<Self> {
                Self::cast(node)
            }
        })*
    };
}

ast_cast!(
    Query, SquareFilter, Tag, Key, Value, RoundFilter, Around, Area, Bbox, Macro, MacroValue, Set,
    Assignment, Statement,
);

impl Oql {
    pub(super) fn from_root(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::Oql);
        Self(node)
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> + use<> {
        children(&self.0)
    }
}

impl Query {
    /// Element type keyword (`node`, `way`, ...), absent for macro selectors.
    pub fn keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Keyword)
    }

    pub fn input_set(&self) -> Option<Set> {
        child(&self.0)
    }

    pub fn selector_macro(&self) -> Option<Macro> {
        child(&self.0)
    }

    pub fn square_filters(&self) -> impl Iterator<Item = SquareFilter> + use<> {
        children(&self.0)
    }

    pub fn round_filters(&self) -> impl Iterator<Item = RoundFilter> + use<> {
        children(&self.0)
    }

    pub fn assignment(&self) -> Option<Assignment> {
        child(&self.0)
    }
}

impl SquareFilter {
    pub fn tag(&self) -> Option<Tag> {
        child(&self.0)
    }
}

/// Comparison inside a tag filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagOp {
    /// `[key]`
    Exists,
    /// `[!key]`
    NotExists,
    /// `[key=value]`
    Equals,
    /// `[key!=value]`
    NotEquals,
    /// `[key~regex]`
    Matches,
    /// `[key!~regex]`
    NotMatches,
    /// `[~regex~regex]`
    KeyMatches,
}

impl Tag {
    pub fn key(&self) -> Option<Key> {
        child(&self.0)
    }

    pub fn value(&self) -> Option<Value> {
        child(&self.0)
    }

    pub fn op(&self) -> Option<TagOp> {
        let first = self.0.first_token()?;
        if first.kind() == SyntaxKind::Negation {
            return Some(TagOp::NotExists);
        }
        if first.kind() == SyntaxKind::Tilde {
            return Some(TagOp::KeyMatches);
        }
        let op = self
            .0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Equals
                        | SyntaxKind::NotEquals
                        | SyntaxKind::Tilde
                        | SyntaxKind::NotTilde
                )
            });
        Some(match op.map(|t| t.kind()) {
            Some(SyntaxKind::Equals) => TagOp::Equals,
            Some(SyntaxKind::NotEquals) => TagOp::NotEquals,
            Some(SyntaxKind::Tilde) => TagOp::Matches,
            Some(SyntaxKind::NotTilde) => TagOp::NotMatches,
            _ => TagOp::Exists,
        })
    }

    /// Regex operands in source order.
    pub fn regexes(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| t.kind() == SyntaxKind::Regex)
    }
}

impl Key {
    pub fn token(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }

    /// Key text without quotes.
    pub fn name(&self) -> Option<String> {
        self.token().map(|t| unquote(t.text()).to_string())
    }
}

impl Value {
    pub fn token(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }

    /// Value text without quotes.
    pub fn text(&self) -> Option<String> {
        self.token().map(|t| unquote(t.text()).to_string())
    }

    /// The owning tag's key: parent `Tag`, then its `Key` child.
    pub fn key(&self) -> Option<Key> {
        self.0.parent().and_then(Tag::cast)?.key()
    }
}

impl RoundFilter {
    pub fn filter_macro(&self) -> Option<Macro> {
        child(&self.0)
    }

    pub fn around(&self) -> Option<Around> {
        child(&self.0)
    }

    pub fn area(&self) -> Option<Area> {
        child(&self.0)
    }

    pub fn bbox(&self) -> Option<Bbox> {
        child(&self.0)
    }
}

impl Around {
    pub fn input_set(&self) -> Option<Set> {
        child(&self.0)
    }

    pub fn radius(&self) -> Option<f64> {
        let radius = self.0.children().find(|n| n.kind() == SyntaxKind::Radius)?;
        token(&radius, SyntaxKind::Number)?.text().parse().ok()
    }
}

impl Area {
    pub fn input_set(&self) -> Option<Set> {
        child(&self.0)
    }
}

impl Bbox {
    pub fn numbers(&self) -> Vec<f64> {
        self.0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| t.kind() == SyntaxKind::Number)
            .filter_map(|t| t.text().parse().ok())
            .collect()
    }
}

impl Macro {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Identifier)
    }

    pub fn values(&self) -> impl Iterator<Item = MacroValue> + use<> {
        children(&self.0)
    }
}

impl MacroValue {
    /// Value text with inner whitespace preserved, without the language code.
    pub fn text(&self) -> String {
        let tokens: Vec<_> = self
            .0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .take_while(|t| t.kind() != SyntaxKind::At)
            .collect();
        let Some(first) = tokens.iter().position(|t| t.kind() == SyntaxKind::MacroText) else {
            return String::new();
        };
        let last = tokens
            .iter()
            .rposition(|t| t.kind() == SyntaxKind::MacroText)
            .unwrap_or(first);
        tokens[first..=last].iter().map(|t| t.text()).collect()
    }

    pub fn language_code(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::LanguageCode)
    }
}

impl Set {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Variable)
    }
}

impl Assignment {
    pub fn set(&self) -> Option<Set> {
        child(&self.0)
    }
}

impl Union {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + use<> {
        children(&self.0)
    }

    pub fn assignment(&self) -> Option<Assignment> {
        child(&self.0)
    }
}

impl Difference {
    pub fn minuend(&self) -> Option<Statement> {
        children(&self.0).next()
    }

    pub fn subtrahend(&self) -> Option<Statement> {
        children(&self.0).nth(1)
    }

    pub fn assignment(&self) -> Option<Assignment> {
        child(&self.0)
    }
}

impl Settings {
    /// `(name, value)` pairs in source order; recovered entries may lack either.
    pub fn entries(&self) -> Vec<(Option<String>, Option<String>)> {
        let mut entries = Vec::new();
        let mut name = None;
        for node in self.0.children() {
            match node.kind() {
                SyntaxKind::SettingName => {
                    if name.is_some() {
                        entries.push((name.take(), None));
                    }
                    name = Some(node.text().to_string());
                }
                SyntaxKind::SettingValue => {
                    entries.push((name.take(), Some(node.text().to_string())));
                }
                _ => {}
            }
        }
        if name.is_some() {
            entries.push((name, None));
        }
        entries
    }
}

impl Foreach {
    pub fn input_set(&self) -> Option<Set> {
        child(&self.0)
    }

    pub fn body(&self) -> impl Iterator<Item = Statement> + use<> {
        children(&self.0)
    }
}

impl IsIn {
    pub fn input_set(&self) -> Option<Set> {
        child(&self.0)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let mut numbers = self
            .0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| t.kind() == SyntaxKind::Number)
            .filter_map(|t| t.text().parse().ok());
        Some((numbers.next()?, numbers.next()?))
    }
}

impl Out {
    pub fn input_set(&self) -> Option<Set> {
        child(&self.0)
    }

    /// Output modifiers such as `body`, `geom` or a limit.
    pub fn modifiers(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::Word | SyntaxKind::Number))
            .map(|t| t.text().to_string())
            .collect()
    }
}
