//! Tag metadata for the filter under the cursor.

use std::fmt;

use oql_core::{TagKey, TagValue};
use rowan::{TextRange, TextSize};

use super::Analyzer;
use crate::parser::{Parse, Tag};

/// Description of a `[key=value]` filter whose key the index knows.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Hover {
    /// Span of the whole tag inside the brackets.
    #[serde(serialize_with = "serialize_range")]
    pub range: TextRange,
    pub key: TagKey,
    /// Value as written, without quotes.
    pub value: Option<String>,
    /// Metadata for `value`, when it is a known value of `key`.
    pub value_info: Option<TagValue>,
}

impl Hover {
    /// `key` or `key=value`.
    pub fn title(&self) -> String {
        match &self.value {
            Some(value) => format!("{}={value}", self.key.key),
            None => self.key.key.clone(),
        }
    }

    pub fn key_url(&self) -> String {
        self.key.wiki_url()
    }

    pub fn value_url(&self) -> Option<String> {
        self.value_info.as_ref().map(|v| v.wiki_url(&self.key.key))
    }

    /// Plain-text summary, percentages with two decimals.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = &self.key;
        writeln!(f, "{}", self.title())?;
        writeln!(f, "{}", self.key_url())?;
        if let Some(url) = self.value_url() {
            writeln!(f, "{url}")?;
        }
        writeln!(
            f,
            "{} objects ({}%)",
            key.count_all,
            percent(key.count_all_fraction)
        )?;
        write!(
            f,
            "{}% nodes - {}% ways - {}% relations",
            percent(key.count_nodes_fraction),
            percent(key.count_ways_fraction),
            percent(key.count_relations_fraction)
        )?;

        if !key.description.is_empty() {
            write!(f, "\n\n{}", key.description.trim_end())?;
        }
        if let Some(value) = self.value_info.as_ref().filter(|v| !v.description.is_empty()) {
            write!(f, "\n\n{}: {}", value.value, value.description.trim_end())?;
        }

        if key.values.is_empty() {
            return Ok(());
        }
        write!(f, "\n\nvalues:")?;
        for value in &key.values {
            let marker = if self.value.as_deref() == Some(value.value.as_str()) {
                '*'
            } else {
                ' '
            };
            write!(f, "\n{marker} {}% - {}", percent(value.fraction), value.value)?;
            if !value.description.is_empty() {
                write!(f, " - {}", value.description)?;
            }
        }
        Ok(())
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.2}", fraction * 100.0)
}

pub(super) fn hover(analyzer: &Analyzer, parse: &Parse, offset: TextSize) -> Option<Hover> {
    let root = parse.syntax();
    let offset = offset.min(root.text_range().end());
    let tag = root
        .token_at_offset(offset)
        .find_map(|token| token.parent_ancestors().find_map(Tag::cast))?;

    let name = tag.key()?.name()?;
    let key = analyzer.index().lookup(&name)?.clone();
    let value = tag.value().and_then(|v| v.text());
    let value_info = value.as_deref().and_then(|v| key.value(v)).cloned();

    Some(Hover {
        range: tag.as_cst().text_range(),
        key,
        value,
        value_info,
    })
}

fn serialize_range<S: serde::Serializer>(range: &TextRange, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeTuple;
    let mut tuple = s.serialize_tuple(2)?;
    tuple.serialize_element(&u32::from(range.start()))?;
    tuple.serialize_element(&u32::from(range.end()))?;
    tuple.end()
}
