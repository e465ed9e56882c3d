#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Tag metadata for the OQL language core.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the taginfo feed (`taginfo.json`)
//! - **Index layer**: [`TagIndex`], a write-once map from tag key to metadata
//!
//! The index is loaded once and shared by every editor session. Until the load
//! completes it reports itself as not loaded and every lookup misses, which
//! readers treat as "no metadata" rather than "unknown tag".

pub mod colors;

pub use colors::Colors;


use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use indexmap::IndexMap;

const WIKI_BASE: &str = "https://wiki.openstreetmap.org/wiki";

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Usage statistics and known values for one OSM tag key.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TagKey {
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub values: Vec<TagValue>,
    #[serde(default)]
    pub count_all: u64,
    #[serde(default)]
    pub count_all_fraction: f64,
    #[serde(default)]
    pub count_nodes_fraction: f64,
    #[serde(default)]
    pub count_ways_fraction: f64,
    #[serde(default)]
    pub count_relations_fraction: f64,
}

/// Usage statistics for one `key=value` pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TagValue {
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fraction: f64,
    #[serde(default)]
    pub count: u64,
}

impl TagKey {
    /// Bare key with no statistics. Mostly useful for tests and embedding.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: String::new(),
            values: Vec::new(),
            count_all: 0,
            count_all_fraction: 0.0,
            count_nodes_fraction: 0.0,
            count_ways_fraction: 0.0,
            count_relations_fraction: 0.0,
        }
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(TagValue::new).collect();
        self
    }

    pub fn value(&self, value: &str) -> Option<&TagValue> {
        self.values.iter().find(|v| v.value == value)
    }

    pub fn wiki_url(&self) -> String {
        format!("{WIKI_BASE}/Key:{}", self.key)
    }
}

impl TagValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: String::new(),
            fraction: 0.0,
            count: 0,
        }
    }

    pub fn wiki_url(&self, key: &str) -> String {
        format!("{WIKI_BASE}/Tag:{key}={}", self.value)
    }
}

/// Parse the taginfo feed: a JSON array of [`TagKey`] objects.
pub fn parse_taginfo(json: &str) -> Result<Vec<TagKey>, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Index Layer
// ============================================================================

/// Failure while loading tag metadata. Only the load path can fail.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch tag metadata: {0}")]
    Fetch(#[from] std::io::Error),

    #[error("failed to parse tag metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Write-once map from tag key to [`TagKey`] metadata, in feed order.
///
/// Readers never block: before a load succeeds, [`is_loaded`](Self::is_loaded)
/// is `false` and lookups return `None`. Loading twice is a no-op.
#[derive(Debug, Default)]
pub struct TagIndex {
    keys: OnceLock<IndexMap<String, TagKey>>,
}

impl TagIndex {
    /// Empty index that has not been loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Already-loaded index built from the given keys.
    pub fn from_keys(keys: impl IntoIterator<Item = TagKey>) -> Self {
        let index = Self::new();
        index.install(keys.into_iter().collect());
        index
    }

    pub fn load_json(&self, json: &str) -> Result<(), LoadError> {
        if self.is_loaded() {
            return Ok(());
        }
        let keys = parse_taginfo(json)?;
        self.install(keys);
        Ok(())
    }

    pub fn load_reader(&self, mut reader: impl Read) -> Result<(), LoadError> {
        if self.is_loaded() {
            return Ok(());
        }
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        self.load_json(&json)
    }

    pub fn load_path(&self, path: &Path) -> Result<(), LoadError> {
        if self.is_loaded() {
            return Ok(());
        }
        tracing::debug!(path = %path.display(), "loading tag metadata");
        let json = std::fs::read_to_string(path)?;
        self.load_json(&json)
    }

    /// Load from `path`, leaving the index empty for the session on failure.
    pub fn load_or_empty(&self, path: &Path) -> bool {
        match self.load_path(path) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "tag metadata unavailable");
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.keys.get().is_some()
    }

    pub fn lookup(&self, key: &str) -> Option<&TagKey> {
        self.keys.get().and_then(|keys| keys.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// All keys in feed order. Empty before load.
    pub fn keys(&self) -> impl Iterator<Item = &TagKey> {
        self.keys.get().into_iter().flat_map(|keys| keys.values())
    }

    pub fn len(&self) -> usize {
        self.keys.get().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn install(&self, keys: Vec<TagKey>) {
        let map: IndexMap<String, TagKey> =
            keys.into_iter().map(|k| (k.key.clone(), k)).collect();
        let count = map.len();
        if self.keys.set(map).is_ok() {
            tracing::info!(keys = count, "tag index loaded");
        }
    }
}
