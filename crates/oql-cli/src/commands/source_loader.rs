use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Query text plus the name shown in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySource {
    /// File path, `<stdin>`, or `None` for inline text.
    pub name: Option<String>,
    pub text: String,
}

impl QuerySource {
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadSourceError {
    #[error("query is required: use a FILE argument, `-` for stdin, or -q/--query")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", .path.display())]
    File { path: PathBuf, source: io::Error },
}

pub fn load_query_source(
    query_path: Option<&Path>,
    query_text: Option<&str>,
) -> Result<QuerySource, LoadSourceError> {
    if let Some(text) = query_text {
        return Ok(QuerySource::inline(text));
    }

    match query_path {
        Some(path) if path.as_os_str() == "-" => load_reader(io::stdin().lock()),
        Some(path) => load_file(path),
        None => Err(LoadSourceError::Missing),
    }
}

/// Like [`load_query_source`], exiting with an error message on failure.
pub fn load_or_exit(query_path: Option<&Path>, query_text: Option<&str>) -> QuerySource {
    load_query_source(query_path, query_text).unwrap_or_else(|err| super::fail(err))
}

pub(crate) fn load_reader(mut reader: impl Read) -> Result<QuerySource, LoadSourceError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(LoadSourceError::Stdin)?;
    Ok(QuerySource {
        name: Some("<stdin>".to_string()),
        text,
    })
}

fn load_file(path: &Path) -> Result<QuerySource, LoadSourceError> {
    let text = fs::read_to_string(path).map_err(|source| LoadSourceError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(QuerySource {
        name: Some(path.to_string_lossy().into_owned()),
        text,
    })
}
