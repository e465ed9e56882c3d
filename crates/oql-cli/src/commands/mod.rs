pub mod ast;
pub mod check;
pub mod complete;
pub mod highlight;
pub mod hover;
pub mod lint;
pub mod source_loader;
pub mod tag_index;

#[cfg(test)]
mod tag_index_tests;

use std::fmt::Display;

use oql_lib::Diagnostics;

use source_loader::QuerySource;

/// Print `error: {err}` to stderr and exit with status 1.
pub fn fail(err: impl Display) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}

/// Render diagnostics as snippets over the query, titled with its file name.
pub fn render_diagnostics(diagnostics: &Diagnostics, query: &QuerySource, color: bool) -> String {
    let mut printer = diagnostics
        .printer()
        .source(&query.text)
        .colored(color);
    if let Some(name) = &query.name {
        printer = printer.path(name);
    }
    printer.render()
}

/// Serialize `value` for stdout.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|err| fail(format_args!("failed to serialize output: {err}")))
}
