//! Grammar productions for OQL.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Statements own their terminating `;`, so removing a statement node removes
//! the whole statement from the source.

mod atoms;
mod blocks;
mod filters;
mod statements;
