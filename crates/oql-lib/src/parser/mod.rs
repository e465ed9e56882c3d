//! Parser infrastructure for OQL.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//! Key design decisions borrowed from rust-analyzer, rnix-parser, and taplo:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Contextual lexing: bracket and macro contents are tokenized by mode-specific lexers
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: `(...)` blocks become `Union`/`Difference` once the `-` is seen
//! - Explicit recovery sets: per-production sets determine when to bail vs consume diagnostics
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree. Recovery follows these rules:
//!
//! 1. Tokens that cannot start a statement get wrapped in `SyntaxKind::Error` nodes,
//!    up to the next `;` or statement start
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Unclosed delimiters point back at the opening token
//! 4. On recursion limit, remaining input goes into single Error node
//!
//! Only exhausting configured execution fuel is an actual error.

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod printer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod tests;

pub use cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    Area, Around, Assignment, Bbox, Difference, Foreach, Group, IsIn, Key, Macro, MacroValue, Oql,
    Out, Query, Recurse, RoundFilter, Set, Settings, SquareFilter, Statement, Tag, TagOp, Union,
    Value,
};

pub use core::{DEFAULT_RECURSION_LIMIT, Parser, ParserConfig};
pub use printer::CstPrinter;

use crate::Error;
use crate::diagnostics::Diagnostics;
use lexer::lex;

/// Parse result: the green tree plus syntax diagnostics.
///
/// The tree is always complete. Diagnostics are returned separately.
/// Error nodes in the tree represent recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
    diagnostics: Diagnostics,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    /// Creates a typed view over the immutable green tree.
    /// Cheap: SyntaxNode is a thin wrapper with parent pointers.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> Oql {
        Oql::from_root(self.syntax())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// No syntax errors were reported.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn statements(&self) -> impl Iterator<Item = Statement> {
        self.root().statements()
    }

    /// Text of the first `///` comment, used to name the query.
    pub fn title(&self) -> Option<String> {
        self.syntax()
            .descendants_with_tokens()
            .filter_map(|el| el.into_token())
            .find(|t| t.kind() == SyntaxKind::LineCommentTitle)
            .map(|t| t.text().trim_start_matches('/').trim().to_string())
            .filter(|title| !title.is_empty())
    }

    pub fn printer(&self) -> CstPrinter {
        CstPrinter::new(self.syntax())
    }
}

/// Main entry point. Never fails: malformed input yields error nodes and diagnostics.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    tracing::debug!(bytes = source.len(), tokens = tokens.len(), "parsing");
    let mut parser = Parser::new(source, tokens);
    parser.parse_root();
    match parser.finish() {
        Ok((cst, diagnostics)) => Parse { cst, diagnostics },
        // Without exec fuel there is no fatal path.
        Err(err) => unreachable!("unlimited parse failed: {err}"),
    }
}

/// Parse with explicit limits. Returns `Err` when execution fuel runs out.
pub fn parse_with(source: &str, config: ParserConfig) -> Result<Parse, Error> {
    let tokens = lex(source);
    tracing::debug!(
        bytes = source.len(),
        tokens = tokens.len(),
        ?config,
        "parsing with limits"
    );
    let mut parser = Parser::new(source, tokens).with_config(config);
    parser.parse_root();
    let (cst, diagnostics) = parser.finish()?;
    Ok(Parse { cst, diagnostics })
}

#[cfg(test)]
impl Parse {
    pub(crate) fn dump_cst(&self) -> String {
        self.printer().dump()
    }

    pub(crate) fn dump_cst_full(&self) -> String {
        self.printer().with_trivia(true).with_spans(true).dump()
    }

    pub(crate) fn dump_ast(&self) -> String {
        self.printer().raw(false).dump()
    }

    /// One line per diagnostic after cascade suppression.
    pub(crate) fn dump_diagnostics(&self) -> String {
        self.diagnostics
            .filtered()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[track_caller]
    pub(crate) fn expect_valid(source: &str) -> Parse {
        let parse = parse(source);
        assert!(
            parse.is_valid(),
            "expected valid input, got:\n{}",
            parse.dump_diagnostics()
        );
        parse
    }

    #[track_caller]
    pub(crate) fn expect_invalid(source: &str) -> String {
        let parse = parse(source);
        assert!(!parse.is_valid(), "expected diagnostics for {source:?}");
        parse.dump_diagnostics()
    }
}
