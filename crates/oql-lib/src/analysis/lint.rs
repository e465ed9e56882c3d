//! Tree walk that flags unknown tags and statements the request generator
//! cannot embed.

use oql_core::TagKey;

use super::Analyzer;
use super::levenshtein::suggestions;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{Key, Parse, SyntaxKind, SyntaxNode, SyntaxToken, Value};

pub(super) fn lint(analyzer: &Analyzer, parse: &Parse) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let index_loaded = analyzer.index().is_loaded();

    for node in parse.syntax().descendants() {
        match node.kind() {
            SyntaxKind::Key if index_loaded => lint_key(analyzer, &node, &mut diagnostics),
            SyntaxKind::Value if index_loaded => lint_value(analyzer, &node, &mut diagnostics),
            SyntaxKind::Settings => {
                disallow(DiagnosticKind::DisallowedSettings, &node, &mut diagnostics)
            }
            SyntaxKind::Out => disallow(DiagnosticKind::DisallowedOut, &node, &mut diagnostics),
            _ => {}
        }
    }

    tracing::debug!(count = diagnostics.len(), "lint finished");
    diagnostics
}

fn lint_key(analyzer: &Analyzer, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
    let Some(key) = Key::cast(node.clone()) else {
        return;
    };
    let (Some(token), Some(name)) = (key.token(), key.name()) else {
        return;
    };
    if name.is_empty() || analyzer.index().contains(&name) {
        return;
    }

    let known = analyzer
        .index()
        .keys()
        .map(|k| (k.key.as_str(), k.count_all));
    let fixes = suggestions(&name, known, analyzer.config().max_distance);
    report_unknown(diagnostics, DiagnosticKind::UnknownTagKey, &token, &name, &fixes);
}

fn lint_value(analyzer: &Analyzer, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
    let Some(value) = Value::cast(node.clone()) else {
        return;
    };
    let (Some(token), Some(text)) = (value.token(), value.text()) else {
        return;
    };
    let Some(key) = value
        .key()
        .and_then(|k| k.name())
        .and_then(|name| analyzer.index().lookup(&name))
    else {
        return;
    };
    if key.value(&text).is_some() {
        return;
    }

    let fixes = value_suggestions(key, &text, analyzer.config().max_distance);
    let detail = format!("`{text}` for key `{}`", key.key);
    report_unknown(diagnostics, DiagnosticKind::UnknownTagValue, &token, &detail, &fixes);
}

fn value_suggestions<'k>(key: &'k TagKey, text: &str, max_distance: usize) -> Vec<&'k str> {
    let known = key.values.iter().map(|v| (v.value.as_str(), v.count));
    suggestions(text, known, max_distance)
}

/// Hint with one fix per suggestion; each fix keeps the original quoting.
fn report_unknown(
    diagnostics: &mut Diagnostics,
    kind: DiagnosticKind,
    token: &SyntaxToken,
    detail: &str,
    suggestions: &[&str],
) {
    let mut builder = diagnostics.report(kind, token.text_range()).message(detail);
    for suggestion in suggestions {
        builder = builder.fix(
            format!("replace with `{suggestion}`"),
            requote(token.text(), suggestion),
        );
    }
    builder.emit();
}

fn disallow(kind: DiagnosticKind, node: &SyntaxNode, diagnostics: &mut Diagnostics) {
    diagnostics
        .report(kind, node.text_range())
        .fix("remove statement", "")
        .emit();
}

/// Wraps `replacement` in the quotes `original` used. Bare text that would
/// not lex as a single word gets double quotes.
pub(super) fn requote(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(quote @ ('"' | '\'')) => quoted(quote, replacement),
        _ if needs_quotes(replacement) => quoted('"', replacement),
        _ => replacement.to_string(),
    }
}

fn quoted(quote: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        if c == quote || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Characters that end a bare word inside `[...]`.
const RESERVED: &[char] = &['[', ']', '(', ')', '{', '}', ';', ',', '=', '!', '~', '"', '\''];

fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.starts_with('/')
        || text.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c))
}
