use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics have overlapping spans, the higher-priority one
/// suppresses the lower-priority one. This prevents cascading error noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the statement
    UnclosedParen,
    UnclosedBracket,
    UnclosedMacro,
    UnterminatedString,

    // User omitted something required - root cause errors
    ExpectedStatement,
    ExpectedToken,
    ExpectedKey,
    ExpectedValue,
    ExpectedRegex,
    ExpectedVariable,
    ExpectedFilter,
    ExpectedNumber,
    MissingSemicolon,

    // User wrote something that doesn't belong
    EmptyGroup,
    UnexpectedToken,
    RecursionLimit,

    // Statement kinds that cannot be embedded in a larger request
    DisallowedSettings,
    DisallowedOut,

    // Advisory, relative to the tag metadata index
    UnknownTagKey,
    UnknownTagValue,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnknownTagKey | Self::UnknownTagValue => Severity::Hint,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when spans overlap.
    ///
    /// Uses enum discriminant ordering: lower position = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Unclosed delimiters; suppressed by root-cause errors at the same position.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedMacro
        )
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedStatement
                | Self::ExpectedToken
                | Self::ExpectedKey
                | Self::ExpectedValue
                | Self::ExpectedRegex
                | Self::ExpectedVariable
                | Self::ExpectedFilter
                | Self::ExpectedNumber
        )
    }

    /// Produced by the linter rather than the parser.
    pub fn is_lint(&self) -> bool {
        matches!(
            self,
            Self::DisallowedSettings
                | Self::DisallowedOut
                | Self::UnknownTagKey
                | Self::UnknownTagValue
        )
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::DisallowedSettings => {
                Some("queries are embedded in a generated request that sets its own options")
            }
            Self::DisallowedOut => Some("output is added by the generated request"),
            Self::EmptyGroup => Some("put at least one statement between `(` and `)`"),
            Self::ExpectedVariable => Some("e.g., `.result`"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedMacro => "missing closing `}}`",
            Self::UnterminatedString => "unterminated string",

            Self::ExpectedStatement => "expected a statement",
            Self::ExpectedToken => "expected token",
            Self::ExpectedKey => "expected tag key",
            Self::ExpectedValue => "expected tag value",
            Self::ExpectedRegex => "expected regular expression",
            Self::ExpectedVariable => "expected set name",
            Self::ExpectedFilter => "expected filter",
            Self::ExpectedNumber => "expected number",
            Self::MissingSemicolon => "missing `;` after statement",

            Self::EmptyGroup => "empty `()` block",
            Self::UnexpectedToken => "unexpected token",
            Self::RecursionLimit => "blocks nested too deeply",

            Self::DisallowedSettings => "settings are not allowed",
            Self::DisallowedOut => "`out` statements are not allowed",

            Self::UnknownTagKey => "unknown tag key",
            Self::UnknownTagValue => "unknown tag value",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::ExpectedToken => "expected {}".to_string(),
            Self::UnknownTagKey => "unknown tag key `{}`".to_string(),
            Self::UnknownTagValue => "unknown value {}".to_string(),
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedMacro => {
                format!("{}; {{}}", self.fallback_message())
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Hint,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// Quick fix: replace the diagnostic's range with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `source` with `range` replaced.
    pub fn apply(&self, source: &str, range: TextRange) -> String {
        let start = usize::from(range.start()).min(source.len());
        let end = usize::from(range.end()).clamp(start, source.len());
        let mut out = String::with_capacity(source.len() + self.replacement.len());
        out.push_str(&source[..start]);
        out.push_str(&self.replacement);
        out.push_str(&source[end..]);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RelatedInfo {
    #[serde(serialize_with = "serialize_range")]
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output). Fixes apply to it.
    #[serde(serialize_with = "serialize_range")]
    pub(crate) range: TextRange,
    pub(crate) severity: Severity,
    pub(crate) message: String,
    pub(crate) fixes: Vec<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            severity: kind.default_severity(),
            message: message.into(),
            fixes: Vec::new(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    pub fn is_hint(&self) -> bool {
        self.severity == Severity::Hint
    }

    /// Applies the fix at `index` to `source`.
    pub fn apply_fix(&self, source: &str, index: usize) -> Option<String> {
        self.fixes
            .get(index)
            .map(|fix| fix.apply(source, self.range))
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for fix in &self.fixes {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

fn serialize_range<S: serde::Serializer>(range: &TextRange, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeTuple;
    let mut tuple = s.serialize_tuple(2)?;
    tuple.serialize_element(&u32::from(range.start()))?;
    tuple.serialize_element(&u32::from(range.end()))?;
    tuple.end()
}
