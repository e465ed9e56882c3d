//! Contextual lexer for OQL.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! OQL is not context-free at the token level: `[` opens either a settings
//! block or a tag filter, words mean different things inside brackets and
//! macros, and a word after `.` names a set. The lexer therefore runs one
//! Logos token set per [`LexMode`] and switches between them as it goes.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character. This keeps the token stream manageable for malformed input.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;
use super::cst::token_sets::WORDS;

/// Lexer state that produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    #[default]
    Top,
    /// Inside `[...]` after an element selector.
    Tag,
    /// Inside `[...]` at statement start.
    Settings,
    /// Inside `{{...}}`.
    Macro,
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
    pub mode: LexMode,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange, mode: LexMode) -> Self {
        Self { kind, span, mode }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TagToken {
    #[token("]")]
    BracketClose,

    #[token("=")]
    Equals,

    #[token("!=")]
    NotEquals,

    #[token("~")]
    Tilde,

    #[token("!~")]
    NotTilde,

    #[token("!")]
    Negation,

    #[token(",")]
    Comma,

    /// Quoted string; an unterminated one stops at the end of the line or bracket.
    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r#""(?:[^"\\\n\]]|\\.)*"#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    #[regex(r"'(?:[^'\\\n\]]|\\.)*")]
    Text,

    #[regex(r#"[^\s\[\](){};,=!~"'/{}][^\s\[\](){};,=!~"'{}]*"#)]
    Word,

    #[token("(")]
    #[token(")")]
    #[token(";")]
    Exit,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsToken {
    #[token("]")]
    BracketClose,

    #[token(":")]
    Colon,

    #[token("{{")]
    MacroOpen,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r#""(?:[^"\\\n\]]|\\.)*"#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    #[regex(r"'(?:[^'\\\n\]]|\\.)*")]
    #[regex(r#"[^\s\[\](){};:"'/{}][^\s\[\](){};:"'{}]*"#)]
    Text,

    #[token("(")]
    #[token(")")]
    #[token(";")]
    Exit,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum MacroToken {
    #[token("}}")]
    MacroClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token("@")]
    At,

    #[regex(r"[^\s{}:;@()\[\]]+")]
    Text,

    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    Exit,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
}

/// Outcome of scanning one token in the current mode.
enum Scan {
    Token(SyntaxKind, usize),
    /// Leave the mode without consuming input.
    Exit,
    Error(usize),
}

/// Lazy contextual tokenizer. Can be restarted at any offset in any mode.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    mode: LexMode,
    /// Mode to resume after the current macro closes.
    macro_return: LexMode,
    /// Last non-trivia token, used for contextual classification.
    prev: Option<Token>,
    macro_name_pending: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_mode(source, 0, LexMode::Top)
    }

    /// Restart at `offset`, rounded down to a char boundary.
    pub fn with_mode(source: &'src str, offset: usize, mode: LexMode) -> Self {
        let mut pos = offset.min(source.len());
        while !source.is_char_boundary(pos) {
            pos -= 1;
        }
        Self {
            source,
            pos,
            mode,
            macro_return: LexMode::Top,
            prev: None,
            macro_name_pending: mode == LexMode::Macro,
        }
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    fn scan_token(&self) -> Scan {
        let rest = &self.source[self.pos..];
        match self.mode {
            LexMode::Top => scan_with::<SyntaxKind>(rest, Some),
            LexMode::Tag => scan_with::<TagToken>(rest, |t| match t {
                TagToken::BracketClose => Some(SyntaxKind::BracketClose),
                TagToken::Equals => Some(SyntaxKind::Equals),
                TagToken::NotEquals => Some(SyntaxKind::NotEquals),
                TagToken::Tilde => Some(SyntaxKind::Tilde),
                TagToken::NotTilde => Some(SyntaxKind::NotTilde),
                TagToken::Negation => Some(SyntaxKind::Negation),
                TagToken::Comma => Some(SyntaxKind::Comma),
                TagToken::Text | TagToken::Word => Some(SyntaxKind::Identifier),
                TagToken::Exit => None,
                TagToken::Whitespace => Some(SyntaxKind::Whitespace),
                TagToken::LineComment => Some(SyntaxKind::LineComment),
                TagToken::BlockComment => Some(SyntaxKind::BlockComment),
            }),
            LexMode::Settings => scan_with::<SettingsToken>(rest, |t| match t {
                SettingsToken::BracketClose => Some(SyntaxKind::BracketClose),
                SettingsToken::Colon => Some(SyntaxKind::Colon),
                SettingsToken::MacroOpen => Some(SyntaxKind::MacroOpen),
                SettingsToken::Text => Some(SyntaxKind::Identifier),
                SettingsToken::Exit => None,
                SettingsToken::Whitespace => Some(SyntaxKind::Whitespace),
                SettingsToken::LineComment => Some(SyntaxKind::LineComment),
                SettingsToken::BlockComment => Some(SyntaxKind::BlockComment),
            }),
            LexMode::Macro => scan_with::<MacroToken>(rest, |t| match t {
                MacroToken::MacroClose => Some(SyntaxKind::MacroClose),
                MacroToken::Colon => Some(SyntaxKind::Colon),
                MacroToken::Semicolon => Some(SyntaxKind::Semicolon),
                MacroToken::At => Some(SyntaxKind::At),
                MacroToken::Text => Some(SyntaxKind::MacroText),
                MacroToken::Exit => None,
                MacroToken::Whitespace => Some(SyntaxKind::Whitespace),
            }),
        }
    }

    /// Refines a raw kind using the previous token.
    fn classify(&mut self, kind: SyntaxKind) -> SyntaxKind {
        let prev = self.prev.map(|t| t.kind);
        match self.mode {
            LexMode::Top if prev == Some(SyntaxKind::Dot) && WORDS.contains(kind) => {
                SyntaxKind::Variable
            }
            LexMode::Tag
                if kind == SyntaxKind::Identifier
                    && matches!(prev, Some(SyntaxKind::Tilde | SyntaxKind::NotTilde)) =>
            {
                SyntaxKind::Regex
            }
            LexMode::Macro if kind == SyntaxKind::MacroText => {
                if self.macro_name_pending {
                    SyntaxKind::Identifier
                } else if prev == Some(SyntaxKind::At) {
                    SyntaxKind::LanguageCode
                } else {
                    SyntaxKind::MacroText
                }
            }
            _ => kind,
        }
    }

    fn transition(&mut self, token: Token) {
        match (self.mode, token.kind) {
            (LexMode::Top, SyntaxKind::BracketOpen) => {
                self.mode = if self.prev.is_some_and(ends_selector) {
                    LexMode::Tag
                } else {
                    LexMode::Settings
                };
            }
            (LexMode::Top | LexMode::Settings, SyntaxKind::MacroOpen) => {
                self.macro_return = self.mode;
                self.mode = LexMode::Macro;
                self.macro_name_pending = true;
            }
            (LexMode::Tag | LexMode::Settings, SyntaxKind::BracketClose) => {
                self.mode = LexMode::Top;
            }
            (LexMode::Macro, SyntaxKind::MacroClose) => {
                self.mode = self.macro_return;
                self.macro_return = LexMode::Top;
            }
            (
                LexMode::Macro,
                SyntaxKind::Identifier | SyntaxKind::Colon | SyntaxKind::Semicolon | SyntaxKind::At,
            ) => {
                self.macro_name_pending = false;
            }
            _ => {}
        }
    }

    fn emit(&self, kind: SyntaxKind, range: Range<usize>) -> Token {
        Token::new(kind, range_to_text_range(range), self.mode)
    }
}

/// `]` of a tag filter, `)`, `}}`, an element type or a set: a `[` after any
/// of these is a tag filter rather than a settings block.
fn ends_selector(token: Token) -> bool {
    match token.kind {
        SyntaxKind::Keyword | SyntaxKind::Variable | SyntaxKind::ParenClose => true,
        SyntaxKind::MacroClose => token.mode == LexMode::Macro,
        SyntaxKind::BracketClose => token.mode == LexMode::Tag,
        _ => false,
    }
}

fn scan_with<'s, T>(rest: &'s str, map: impl Fn(T) -> Option<SyntaxKind>) -> Scan
where
    T: Logos<'s, Source = str, Extras = ()>,
{
    let mut lexer = T::lexer(rest);
    match lexer.next() {
        Some(Ok(token)) => match map(token) {
            Some(kind) => Scan::Token(kind, lexer.span().end),
            None => Scan::Exit,
        },
        Some(Err(_)) => Scan::Error(lexer.span().end.max(1)),
        None => Scan::Error(rest.len()),
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut garbage_start: Option<usize> = None;

        while self.pos < self.source.len() {
            match self.scan_token() {
                Scan::Exit => {
                    self.mode = LexMode::Top;
                    self.macro_return = LexMode::Top;
                }
                Scan::Error(len) => {
                    garbage_start.get_or_insert(self.pos);
                    self.pos += len;
                    while !self.source.is_char_boundary(self.pos) {
                        self.pos += 1;
                    }
                }
                Scan::Token(kind, len) => {
                    if let Some(start) = garbage_start {
                        let token = self.emit(SyntaxKind::Garbage, start..self.pos);
                        self.prev = Some(token);
                        return Some(token);
                    }

                    let kind = self.classify(kind);
                    let token = self.emit(kind, self.pos..self.pos + len);
                    self.pos += len;
                    if !kind.is_trivia() {
                        self.transition(token);
                        self.prev = Some(token);
                    }
                    return Some(token);
                }
            }
        }

        let start = garbage_start?;
        let token = self.emit(SyntaxKind::Garbage, start..self.source.len());
        self.prev = Some(token);
        Some(token)
    }
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Whether a quoted token is missing its closing quote.
pub fn is_unterminated_string(text: &str) -> bool {
    let Some(quote) = text.chars().next().filter(|c| matches!(c, '"' | '\'')) else {
        return false;
    };
    if text.len() < 2 || !text.ends_with(quote) {
        return true;
    }
    let body = &text[1..text.len() - 1];
    let trailing_backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    trailing_backslashes % 2 == 1
}

/// Token text with surrounding quotes removed.
pub fn unquote(text: &str) -> &str {
    let Some(quote) = text.chars().next().filter(|c| matches!(c, '"' | '\'')) else {
        return text;
    };
    let inner = &text[1..];
    inner.strip_suffix(quote).unwrap_or(inner)
}
