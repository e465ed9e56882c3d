use std::path::PathBuf;

use super::render_diagnostics;
use super::source_loader::load_or_exit;

pub struct CheckArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let query = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let parse = oql_lib::parse(&query.text);
    let diagnostics = parse.diagnostics().filtered();

    if diagnostics.has_errors() {
        eprintln!("{}", render_diagnostics(&diagnostics, &query, args.color));
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
