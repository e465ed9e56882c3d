use std::path::PathBuf;

use oql_lib::{Analyzer, TextSize};

use super::source_loader::load_or_exit;
use super::tag_index::{TaginfoSource, load_index_or_exit};
use super::to_json;

pub struct CompleteArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub offset: u32,
    pub taginfo: Option<TaginfoSource>,
    pub pretty: bool,
}

/// Prints the completion as JSON, or `null` when nothing applies at the cursor.
pub fn run(args: CompleteArgs) {
    let query = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let index = load_index_or_exit(args.taginfo.as_ref());
    let analyzer = Analyzer::new(index);

    let parse = oql_lib::parse(&query.text);
    let completion = analyzer.complete(&parse, TextSize::from(args.offset));
    tracing::debug!(
        offset = args.offset,
        candidates = completion.as_ref().map_or(0, |c| c.candidates.len()),
        "completion"
    );

    println!("{}", to_json(&completion, args.pretty));
}
