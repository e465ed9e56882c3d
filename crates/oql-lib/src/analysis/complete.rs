//! Context-sensitive completion.
//!
//! Rules are tried in a fixed order and the first one that owns the cursor
//! wins: tag key, tag value, macro name, statement keyword. A rule that owns
//! the cursor may still have nothing to offer; later rules are not consulted.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexSet;
use oql_core::{TagIndex, TagKey};
use regex_automata::Input;
use regex_automata::dfa::{Automaton, dense};
use rowan::TextSize;

use super::Analyzer;
use crate::parser::{Parse, SyntaxKind, SyntaxToken, Tag, Value};

/// Macros understood by the request generator.
const MACROS: &[(&str, &str)] = &[
    ("bbox", "bounding box of the current map view"),
    ("center", "center of the current map view"),
    ("date", "ISO date, optionally offset into the past"),
    ("geocodeArea", "area id of a geocoded place"),
    ("geocodeBbox", "bounding box of a geocoded place"),
    ("geocodeCoords", "coordinates of a geocoded place"),
    ("geocodeId", "element id of a geocoded place"),
    ("style", "map style applied to the results"),
    ("data", "external data source"),
];

/// Element type selectors, in the order they are offered.
const KEYWORDS: &[(&str, Option<&str>)] = &[
    ("node", None),
    ("way", None),
    ("relation", None),
    ("nw", Some("nodes and ways")),
    ("wr", Some("ways and relations")),
    ("nr", Some("nodes and relations")),
    ("nwr", Some("nodes, ways and relations")),
];

const WORD_PATTERN: &str = r"^\w*$";

/// What a candidate completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateCategory {
    Keyword,
    TagKey,
    TagValue,
    Macro,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Candidate {
    pub label: String,
    pub category: CandidateCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Candidate {
    fn new(label: impl Into<String>, category: CandidateCategory) -> Self {
        Self {
            label: label.into(),
            category,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail.filter(|d| !d.is_empty());
        self
    }
}

/// Completion result anchored at the start of the word being typed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Completion {
    #[serde(serialize_with = "serialize_offset")]
    pub anchor: TextSize,
    pub candidates: Vec<Candidate>,
    /// Pattern over the text from `anchor` to the cursor. While it matches,
    /// the candidate list stays valid and the client can filter locally.
    pub valid_for: ValidFor,
}

impl Completion {
    fn new(anchor: TextSize, candidates: Candidates) -> Self {
        Self {
            anchor,
            candidates: candidates.items,
            valid_for: candidates.valid_for,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.label.as_str())
    }

    /// Whether typing `text` after the anchor keeps this result valid.
    pub fn is_valid_continuation(&self, text: &str) -> bool {
        self.valid_for.is_match(text)
    }
}

/// Anchored regex with its compiled DFA.
///
/// The DFA is built once and shared by clones, so a memoised candidate list
/// hands the same automaton to every completion it produces. Equality and
/// serialization only look at the pattern.
#[derive(Clone)]
pub struct ValidFor {
    pattern: String,
    dfa: Option<Arc<dense::DFA<Vec<u32>>>>,
}

impl ValidFor {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let dfa = if pattern == WORD_PATTERN {
            word_dfa()
        } else {
            compile(&pattern)
        };
        Self { pattern, dfa }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// An invalid pattern matches nothing.
    pub fn is_match(&self, text: &str) -> bool {
        self.dfa
            .as_ref()
            .is_some_and(|dfa| matches!(dfa.try_search_fwd(&Input::new(text)), Ok(Some(_))))
    }

    #[cfg(test)]
    pub(super) fn shares_dfa(&self, other: &Self) -> bool {
        match (&self.dfa, &other.dfa) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for ValidFor {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for ValidFor {}

impl fmt::Debug for ValidFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidFor").field(&self.pattern).finish()
    }
}

impl serde::Serialize for ValidFor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

fn compile(pattern: &str) -> Option<Arc<dense::DFA<Vec<u32>>>> {
    match dense::DFA::new(pattern) {
        Ok(dfa) => Some(Arc::new(dfa)),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "invalid completion pattern");
            None
        }
    }
}

/// Most lists use the plain word pattern; it is compiled once per process.
fn word_dfa() -> Option<Arc<dense::DFA<Vec<u32>>>> {
    static WORD: OnceLock<Option<Arc<dense::DFA<Vec<u32>>>>> = OnceLock::new();
    WORD.get_or_init(|| compile(WORD_PATTERN)).clone()
}

/// Candidate list plus its validity pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Candidates {
    items: Vec<Candidate>,
    valid_for: ValidFor,
}

impl Candidates {
    fn new(items: Vec<Candidate>) -> Self {
        let valid_for = ValidFor::new(validity_pattern(items.iter().map(|c| c.label.as_str())));
        Self { items, valid_for }
    }

    pub(super) fn for_keys(index: &TagIndex) -> Self {
        let items = index
            .keys()
            .map(|key| {
                Candidate::new(&key.key, CandidateCategory::TagKey)
                    .with_detail(first_line(&key.description))
            })
            .collect();
        Self::new(items)
    }

    fn for_values(key: &TagKey) -> Self {
        let items = key
            .values
            .iter()
            .map(|value| {
                Candidate::new(&value.value, CandidateCategory::TagValue)
                    .with_detail(first_line(&value.description))
            })
            .collect();
        Self::new(items)
    }

    fn empty() -> Self {
        Self {
            items: Vec::new(),
            valid_for: ValidFor::new(WORD_PATTERN),
        }
    }
}

fn first_line(text: &str) -> Option<String> {
    text.lines().next().map(|line| line.trim().to_string())
}

/// `^\w*$` when every label is a plain word, otherwise a pattern built from
/// the first characters and the remaining characters of all labels.
pub(super) fn validity_pattern<'a>(labels: impl IntoIterator<Item = &'a str>) -> String {
    let mut first = IndexSet::new();
    let mut rest = IndexSet::new();
    let mut all_words = true;

    for label in labels {
        all_words &= label.chars().all(is_word_char);
        let mut chars = label.chars();
        if let Some(c) = chars.next() {
            first.insert(c);
        }
        rest.extend(chars);
    }

    if all_words || first.is_empty() {
        return WORD_PATTERN.to_string();
    }

    let first = char_class(&first);
    if rest.is_empty() {
        return format!("^[{first}]$");
    }
    format!("^[{first}][{}]*$", char_class(&rest))
}

/// Class body: `\w` stands in for every word character in the set.
fn char_class(chars: &IndexSet<char>) -> String {
    let mut class = String::new();
    if chars.iter().any(|&c| is_word_char(c)) {
        class.push_str(r"\w");
    }
    let mut buf = [0u8; 4];
    for &c in chars.iter().filter(|&&c| !is_word_char(c)) {
        class.push_str(&regex_syntax::escape(c.encode_utf8(&mut buf)));
    }
    class
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Outcome of one completion rule.
enum Outcome {
    /// The cursor is outside this rule's context.
    Skip,
    /// The rule owns the cursor; `None` means there is nothing to offer.
    Done(Option<Completion>),
}

type Rule = fn(&Analyzer, &Cursor) -> Outcome;

const RULES: &[Rule] = &[complete_key, complete_value, complete_macro, complete_keyword];

pub(super) fn complete(analyzer: &Analyzer, parse: &Parse, offset: TextSize) -> Option<Completion> {
    let cursor = Cursor::new(parse, offset)?;
    for rule in RULES {
        if let Outcome::Done(completion) = rule(analyzer, &cursor) {
            return completion;
        }
    }
    None
}

/// Tokens around the cursor.
struct Cursor {
    offset: TextSize,
    /// Word-like token ending at or containing the cursor.
    word: Option<SyntaxToken>,
    /// Last significant token before `word` (or before the cursor).
    prev: Option<SyntaxToken>,
}

impl Cursor {
    /// `None` when the cursor sits inside a comment.
    fn new(parse: &Parse, offset: TextSize) -> Option<Self> {
        let root = parse.syntax();
        let offset = offset.min(root.text_range().end());
        let left = root
            .token_at_offset(offset)
            .left_biased()
            .filter(|t| t.text_range().start() < offset);

        let Some(left) = left else {
            return Some(Self {
                offset,
                word: None,
                prev: None,
            });
        };

        if is_comment(left.kind()) {
            return None;
        }
        if is_word(left.kind()) {
            let prev = prev_significant(&left);
            return Some(Self {
                offset,
                word: Some(left),
                prev,
            });
        }
        let prev = if left.kind().is_trivia() {
            prev_significant(&left)
        } else {
            Some(left)
        };
        Some(Self {
            offset,
            word: None,
            prev,
        })
    }

    fn word_with_parent(&self, kind: SyntaxKind, parent: SyntaxKind) -> Option<&SyntaxToken> {
        self.word
            .as_ref()
            .filter(|w| w.kind() == kind && w.parent().is_some_and(|p| p.kind() == parent))
    }

    fn prev_is(&self, kinds: &[SyntaxKind], parent: SyntaxKind) -> bool {
        self.word.is_none()
            && self.prev.as_ref().is_some_and(|t| {
                kinds.contains(&t.kind()) && t.parent().is_some_and(|p| p.kind() == parent)
            })
    }
}

fn is_comment(kind: SyntaxKind) -> bool {
    kind.is_trivia() && kind != SyntaxKind::Whitespace
}

fn is_word(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::Keyword
            | SyntaxKind::Word
            | SyntaxKind::KwOut
            | SyntaxKind::KwIsIn
            | SyntaxKind::KwForeach
            | SyntaxKind::KwAround
            | SyntaxKind::Variable
            | SyntaxKind::MacroText
            | SyntaxKind::LanguageCode
    )
}

fn prev_significant(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut current = token.prev_token();
    while let Some(t) = current {
        if !t.kind().is_trivia() {
            return Some(t);
        }
        current = t.prev_token();
    }
    None
}

/// Start of the text inside an opening quote.
fn text_start(token: &SyntaxToken) -> TextSize {
    let start = token.text_range().start();
    if token.text().starts_with(['"', '\'']) {
        start + TextSize::from(1)
    } else {
        start
    }
}

fn complete_key(analyzer: &Analyzer, cursor: &Cursor) -> Outcome {
    let anchor = if let Some(word) = cursor.word_with_parent(SyntaxKind::Identifier, SyntaxKind::Key)
    {
        text_start(word)
    } else if cursor.prev_is(&[SyntaxKind::BracketOpen], SyntaxKind::SquareFilter)
        || cursor.prev_is(&[SyntaxKind::Negation], SyntaxKind::Tag)
    {
        cursor.offset
    } else {
        return Outcome::Skip;
    };

    // Keys only come from the index: until it loads the slot is owned but
    // empty. Macro and keyword lists are static and never wait on it.
    let candidates = analyzer
        .key_candidates()
        .cloned()
        .unwrap_or_else(Candidates::empty);
    Outcome::Done(Some(Completion::new(anchor, candidates)))
}

fn complete_value(analyzer: &Analyzer, cursor: &Cursor) -> Outcome {
    let (anchor, key) =
        if let Some(word) = cursor.word_with_parent(SyntaxKind::Identifier, SyntaxKind::Value) {
            let key = word.parent().and_then(Value::cast).and_then(|v| v.key());
            (text_start(word), key)
        } else if cursor.prev_is(&[SyntaxKind::Equals, SyntaxKind::NotEquals], SyntaxKind::Tag) {
            let key = cursor
                .prev
                .as_ref()
                .and_then(|t| t.parent())
                .and_then(Tag::cast)
                .and_then(|tag| tag.key());
            (cursor.offset, key)
        } else {
            return Outcome::Skip;
        };

    let completion = key
        .and_then(|key| key.name())
        .and_then(|name| analyzer.index().lookup(&name))
        .map(|key| Completion::new(anchor, Candidates::for_values(key)));
    Outcome::Done(completion)
}

fn complete_macro(_: &Analyzer, cursor: &Cursor) -> Outcome {
    let anchor = if let Some(word) = cursor.word_with_parent(SyntaxKind::Identifier, SyntaxKind::Macro)
    {
        word.text_range().start()
    } else if cursor.prev_is(&[SyntaxKind::MacroOpen], SyntaxKind::Macro) {
        cursor.offset
    } else {
        return Outcome::Skip;
    };

    let items = MACROS
        .iter()
        .map(|(name, detail)| {
            Candidate::new(*name, CandidateCategory::Macro).with_detail(Some(detail.to_string()))
        })
        .collect();
    Outcome::Done(Some(Completion::new(anchor, Candidates::new(items))))
}

fn complete_keyword(_: &Analyzer, cursor: &Cursor) -> Outcome {
    let anchor = match &cursor.word {
        Some(word) if matches!(word.kind(), SyntaxKind::Keyword | SyntaxKind::Word) => {
            word.text_range().start()
        }
        Some(_) => return Outcome::Skip,
        None => cursor.offset,
    };
    if !cursor.prev.as_ref().is_none_or(ends_statement) {
        return Outcome::Skip;
    }

    let items = KEYWORDS
        .iter()
        .map(|(name, detail)| {
            Candidate::new(*name, CandidateCategory::Keyword)
                .with_detail(detail.map(str::to_string))
        })
        .collect();
    Outcome::Done(Some(Completion::new(anchor, Candidates::new(items))))
}

/// A statement may start right after this token.
fn ends_statement(token: &SyntaxToken) -> bool {
    let parent = token.parent().map(|p| p.kind());
    match token.kind() {
        SyntaxKind::Semicolon => parent != Some(SyntaxKind::Macro),
        SyntaxKind::ParenOpen => matches!(
            parent,
            Some(
                SyntaxKind::Union
                    | SyntaxKind::Difference
                    | SyntaxKind::Group
                    | SyntaxKind::Foreach
            )
        ),
        SyntaxKind::Minus => parent == Some(SyntaxKind::Difference),
        _ => false,
    }
}

fn serialize_offset<S: serde::Serializer>(offset: &TextSize, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u32(u32::from(*offset))
}
