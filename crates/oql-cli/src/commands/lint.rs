use std::path::PathBuf;

use oql_lib::{Analyzer, Diagnostics, LintConfig, Parse};

use super::source_loader::load_or_exit;
use super::tag_index::{TaginfoSource, load_index_or_exit};
use super::{render_diagnostics, to_json};

pub struct LintArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub taginfo: Option<TaginfoSource>,
    pub max_distance: usize,
    pub json: bool,
    pub pretty: bool,
    pub color: bool,
}

pub fn run(args: LintArgs) {
    let query = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let index = load_index_or_exit(args.taginfo.as_ref());
    let analyzer = Analyzer::new(index)
        .with_config(LintConfig::default().with_max_distance(args.max_distance));

    let parse = oql_lib::parse(&query.text);
    let diagnostics = collect(&analyzer, &parse);

    if args.json {
        println!("{}", to_json(&diagnostics, args.pretty));
    } else if !diagnostics.is_empty() {
        eprintln!("{}", render_diagnostics(&diagnostics, &query, args.color));
    }

    if diagnostics.has_errors() {
        std::process::exit(1);
    }
}

/// Syntax diagnostics (cascades suppressed) followed by lints.
pub(crate) fn collect(analyzer: &Analyzer, parse: &Parse) -> Diagnostics {
    let mut diagnostics = parse.diagnostics().filtered();
    diagnostics.extend(analyzer.lint(parse));
    diagnostics
}
