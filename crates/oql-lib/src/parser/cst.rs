//! Syntax kinds for OQL.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives top-level token recognition; tokens that only occur inside
//! brackets or macros are produced by the mode-specific lexers in `lexer.rs`,
//! and node kinds lack token/regex attributes entirely.
//! `OqlLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{{")]
    MacroOpen,

    #[token("}}")]
    MacroClose,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("->")]
    Arrow,

    #[token("-")]
    Minus,

    Equals,
    NotEquals,
    Tilde,
    NotTilde,
    Negation,
    At,

    #[token("<")]
    Lt,

    #[token("<<")]
    LtLt,

    #[token(">")]
    Gt,

    #[token(">>")]
    GtGt,

    /// Element type selector.
    #[token("node")]
    #[token("way")]
    #[token("relation")]
    #[token("rel")]
    #[token("nw")]
    #[token("wr")]
    #[token("nr")]
    #[token("nwr")]
    #[token("area")]
    #[token("derived")]
    Keyword,

    #[token("out")]
    KwOut,

    #[token("is_in")]
    KwIsIn,

    #[token("foreach")]
    KwForeach,

    #[token("around")]
    KwAround,

    /// Tag key/value, macro name or setting, quoted or bare.
    Identifier,
    /// Operand of `~` / `!~`.
    Regex,

    #[regex(r"-?[0-9]+(?:\.[0-9]+)?")]
    Number,

    /// Set name after `.`; the lexer reclassifies words that follow a dot.
    Variable,
    LanguageCode,
    MacroText,

    /// Bare word with no statement-level meaning (`out` modifiers and the like).
    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// `///` comment; its text names the query.
    #[regex(r"///[^\n]*", allow_greedy = true)]
    LineCommentTitle,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Oql,
    Query,
    Tag,
    Key,
    Value,
    SquareFilter,
    RoundFilter,
    Macro,
    MacroValue,
    Set,
    Assignment,
    Union,
    Difference,
    Group,
    Settings,
    SettingName,
    SettingValue,
    Foreach,
    IsIn,
    Out,
    RecurseUp,
    RecurseDown,
    RecurseUpRelations,
    RecurseDownRelations,
    Around,
    Radius,
    Bbox,
    Area,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | LineComment | LineCommentTitle | BlockComment
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    /// Whether this kind is a leaf produced by the lexer.
    #[inline]
    pub fn is_token(self) -> bool {
        self < Error
    }

    /// Statement-level node kinds.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Query
                | Union
                | Difference
                | Group
                | Settings
                | Foreach
                | IsIn
                | Out
                | RecurseUp
                | RecurseDown
                | RecurseUpRelations
                | RecurseDownRelations
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OqlLang {}

impl Language for OqlLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<OqlLang>;
pub type SyntaxToken = rowan::SyntaxToken<OqlLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                // SAFETY: bounded by `__LAST`, SyntaxKind is repr(u16)
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Tokens that may begin a statement after an optional input set.
    pub const STATEMENT_FIRST: TokenSet = TokenSet::new(&[
        Keyword,
        MacroOpen,
        ParenOpen,
        BracketOpen,
        Dot,
        KwOut,
        KwIsIn,
        KwForeach,
        Lt,
        LtLt,
        Gt,
        GtGt,
    ]);

    /// Statement keywords that may follow a `.set` prefix.
    pub const SET_PREFIXED: TokenSet =
        TokenSet::new(&[KwOut, KwIsIn, KwForeach, Lt, LtLt, Gt, GtGt]);

    pub const RECURSE: TokenSet = TokenSet::new(&[Lt, LtLt, Gt, GtGt]);

    pub const TRIVIA: TokenSet =
        TokenSet::new(&[Whitespace, LineComment, LineCommentTitle, BlockComment]);

    pub const TAG_OPERATORS: TokenSet = TokenSet::new(&[Equals, NotEquals, Tilde, NotTilde]);

    /// Word-like tokens that become a `Variable` after `.`.
    pub const WORDS: TokenSet = TokenSet::new(&[Keyword, KwOut, KwIsIn, KwForeach, KwAround, Word]);

    /// Where a statement body stops consuming stray tokens.
    pub const STATEMENT_RECOVERY: TokenSet = STATEMENT_FIRST.union(TokenSet::new(&[
        Semicolon,
        ParenClose,
    ]));

    pub const FILTER_RECOVERY: TokenSet = TokenSet::new(&[
        BracketClose,
        ParenClose,
        Semicolon,
        ParenOpen,
        BracketOpen,
    ]);

    pub const MACRO_RECOVERY: TokenSet = TokenSet::new(&[
        MacroClose,
        ParenClose,
        BracketClose,
        Semicolon,
    ]);
}
