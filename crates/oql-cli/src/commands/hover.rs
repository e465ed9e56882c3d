use std::path::PathBuf;

use oql_lib::{Analyzer, TextSize};

use super::source_loader::load_or_exit;
use super::tag_index::{TaginfoSource, load_index_or_exit};
use super::to_json;

pub struct HoverArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub offset: u32,
    pub taginfo: Option<TaginfoSource>,
    pub json: bool,
    pub pretty: bool,
}

pub fn run(args: HoverArgs) {
    let query = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let index = load_index_or_exit(args.taginfo.as_ref());
    let analyzer = Analyzer::new(index);

    let parse = oql_lib::parse(&query.text);
    let hover = analyzer.hover(&parse, TextSize::from(args.offset));

    if args.json {
        println!("{}", to_json(&hover, args.pretty));
        return;
    }
    // No output when the cursor is not on a known tag.
    if let Some(hover) = hover {
        println!("{}", hover.render());
    }
}
