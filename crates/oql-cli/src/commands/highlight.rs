//! Print a query with ANSI syntax highlighting.

use std::path::PathBuf;

use oql_core::Colors;
use oql_lib::{HighlightSpan, HighlightTag};

use super::source_loader::load_or_exit;
use super::to_json;

pub struct HighlightArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
    pub pretty: bool,
    pub color: bool,
}

pub fn run(args: HighlightArgs) {
    let query = load_or_exit(args.query_path.as_deref(), args.query_text.as_deref());
    let parse = oql_lib::parse(&query.text);
    let spans = oql_lib::highlight(&parse);

    if args.json {
        println!("{}", to_json(&spans, args.pretty));
        return;
    }
    print!("{}", render(&query.text, &spans, Colors::new(args.color)));
}

/// Source text with each span wrapped in its color. Unstyled gaps are copied as-is.
pub fn render(source: &str, spans: &[HighlightSpan], colors: Colors) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let mut pos = 0;

    for span in spans {
        let start = usize::from(span.range.start());
        let end = usize::from(span.range.end());
        if start < pos || end > source.len() {
            continue;
        }
        out.push_str(&source[pos..start]);
        out.push_str(&colors.paint(color_for(span.tag, &colors), &source[start..end]));
        pos = end;
    }
    out.push_str(&source[pos..]);
    out
}

fn color_for(tag: HighlightTag, colors: &Colors) -> &'static str {
    match tag {
        HighlightTag::Keyword => colors.magenta,
        HighlightTag::String => colors.red,
        HighlightTag::Regexp => colors.yellow,
        HighlightTag::Number | HighlightTag::Operator => colors.cyan,
        HighlightTag::VariableName => colors.blue,
        HighlightTag::Meta | HighlightTag::Brace => colors.green,
        HighlightTag::Paren | HighlightTag::SquareBracket | HighlightTag::LineComment => {
            colors.dim
        }
        HighlightTag::DocComment => colors.bold,
        HighlightTag::Invalid => colors.invalid,
    }
}
