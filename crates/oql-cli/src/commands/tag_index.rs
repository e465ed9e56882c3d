//! Tag metadata for the commands that consult it.

use std::path::PathBuf;
use std::sync::Arc;

use oql_core::{LoadError, TagIndex};

/// Where the taginfo feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaginfoSource {
    pub path: PathBuf,
    /// Set for `--taginfo`: a failed load is fatal rather than a warning.
    pub required: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", .path.display())]
pub struct TaginfoError {
    path: PathBuf,
    source: LoadError,
}

/// Loads the index once per invocation. Without a source the index stays empty.
pub fn load_index(source: Option<&TaginfoSource>) -> Result<Arc<TagIndex>, TaginfoError> {
    let index = TagIndex::new();
    let Some(source) = source else {
        return Ok(Arc::new(index));
    };

    if source.required {
        index.load_path(&source.path).map_err(|err| TaginfoError {
            path: source.path.clone(),
            source: err,
        })?;
    } else {
        index.load_or_empty(&source.path);
    }
    Ok(Arc::new(index))
}

pub fn load_index_or_exit(source: Option<&TaginfoSource>) -> Arc<TagIndex> {
    load_index(source).unwrap_or_else(|err| super::fail(err))
}
