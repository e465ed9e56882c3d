//! Show the syntax tree of a query.

use std::path::PathBuf;

use super::render_diagnostics;
use super::source_loader::load_or_exit;

pub struct AstArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub trivia: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let query = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let parse = oql_lib::parse(&query.text);

    // The tree is printed even when broken; errors go to stderr first.
    let diagnostics = parse.diagnostics().filtered();
    if !diagnostics.is_empty() {
        eprintln!("{}", render_diagnostics(&diagnostics, &query, args.color));
    }

    let output = parse
        .printer()
        .with_trivia(args.trivia)
        .with_spans(args.spans)
        .dump();
    print!("{}", output);
}
