//! OQL: lexer, parser, highlighter, completion and linter for Overpass QL fragments.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use oql_core::TagIndex;
//! use oql_lib::{Analyzer, parse};
//!
//! let source = r#"node["highway"="primary"]({{bbox}});"#;
//! let parse = parse(source);
//! assert!(parse.is_valid());
//!
//! let analyzer = Analyzer::new(Arc::new(TagIndex::new()));
//! let lints = analyzer.lint(&parse);
//! eprintln!("{}", lints.render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analysis;
pub mod diagnostics;
pub mod highlight;
pub mod parser;


pub use analysis::{
    Analyzer, Candidate, CandidateCategory, Completion, Hover, LintConfig, ValidFor,
};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use highlight::{HighlightSpan, HighlightTag, highlight, highlight_tag};
pub use parser::{Parse, ParserConfig, parse, parse_with};
pub use rowan::{TextRange, TextSize};

/// Errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,
}

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
