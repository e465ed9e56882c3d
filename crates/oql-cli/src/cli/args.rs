//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! This allows the same arg definition to be reused across commands with
//! different visibility settings (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Query file, or `-` for stdin (positional).
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Query file (`-` reads stdin)")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_path")
        .help("Inline query text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Include whitespace and comments in the tree (--trivia).
pub fn trivia_arg() -> Arg {
    Arg::new("trivia")
        .long("trivia")
        .action(ArgAction::SetTrue)
        .help("Include whitespace and comment tokens")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Tag metadata feed (--taginfo, or OQL_TAGINFO).
pub fn taginfo_arg() -> Arg {
    Arg::new("taginfo")
        .long("taginfo")
        .value_name("PATH")
        .env("OQL_TAGINFO")
        .value_parser(value_parser!(PathBuf))
        .help("Tag metadata JSON (taginfo format)")
}

/// Edit distance for key and value suggestions (--max-distance).
pub fn max_distance_arg() -> Arg {
    Arg::new("max_distance")
        .long("max-distance")
        .value_name("N")
        .default_value("2")
        .value_parser(value_parser!(usize))
        .help("Maximum edit distance for suggestions")
}

/// Byte offset of the cursor (--offset).
pub fn offset_arg() -> Arg {
    Arg::new("offset")
        .long("offset")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Cursor position as a byte offset into the query")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}
