//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::complete::CompleteArgs;
use crate::commands::highlight::HighlightArgs;
use crate::commands::hover::HoverArgs;
use crate::commands::lint::LintArgs;
use crate::commands::tag_index::TaginfoSource;

pub struct CheckParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub color: ColorChoice,
    // Note: tree, index, cursor and output flags are parsed but not extracted
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub trivia: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            trivia: m.get_flag("trivia"),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            trivia: p.trivia,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct LintParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub taginfo: Option<TaginfoSource>,
    pub max_distance: usize,
    pub json: bool,
    pub compact: bool,
    pub color: ColorChoice,
}

impl LintParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            taginfo: parse_taginfo(m),
            max_distance: parse_max_distance(m),
            json: m.get_flag("json"),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<LintParams> for LintArgs {
    fn from(p: LintParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            taginfo: p.taginfo,
            max_distance: p.max_distance,
            json: p.json,
            pretty: should_pretty_print(p.compact),
            color: p.color.should_colorize(),
        }
    }
}

pub struct CompleteParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub offset: u32,
    pub taginfo: Option<TaginfoSource>,
    pub compact: bool,
    // Note: color is accepted for uniformity; JSON output is never colored
}

impl CompleteParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            offset: parse_offset(m),
            taginfo: parse_taginfo(m),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<CompleteParams> for CompleteArgs {
    fn from(p: CompleteParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            offset: p.offset,
            taginfo: p.taginfo,
            pretty: should_pretty_print(p.compact),
        }
    }
}

pub struct HighlightParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
    pub compact: bool,
    pub color: ColorChoice,
}

impl HighlightParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            json: m.get_flag("json"),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<HighlightParams> for HighlightArgs {
    fn from(p: HighlightParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            json: p.json,
            pretty: should_pretty_print(p.compact),
            // Highlighting goes to stdout, so only stdout decides.
            color: match p.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
            },
        }
    }
}

pub struct HoverParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub offset: u32,
    pub taginfo: Option<TaginfoSource>,
    pub json: bool,
    pub compact: bool,
}

impl HoverParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            offset: parse_offset(m),
            taginfo: parse_taginfo(m),
            json: m.get_flag("json"),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<HoverParams> for HoverArgs {
    fn from(p: HoverParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            offset: p.offset,
            taginfo: p.taginfo,
            json: p.json,
            pretty: should_pretty_print(p.compact),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// A path given on the command line must load; one from `OQL_TAGINFO` may fail quietly.
fn parse_taginfo(m: &ArgMatches) -> Option<TaginfoSource> {
    let path = m.get_one::<PathBuf>("taginfo").cloned()?;
    let required = m.value_source("taginfo") == Some(ValueSource::CommandLine);
    Some(TaginfoSource { path, required })
}

fn parse_max_distance(m: &ArgMatches) -> usize {
    m.get_one::<usize>("max_distance")
        .copied()
        .unwrap_or(oql_lib::analysis::DEFAULT_MAX_DISTANCE)
}

fn parse_offset(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("offset").copied().unwrap_or(0)
}

/// Pretty by default when stdout is a TTY, unless --compact is passed.
fn should_pretty_print(compact: bool) -> bool {
    !compact && std::io::IsTerminal::is_terminal(&std::io::stdout())
}
