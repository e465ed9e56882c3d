//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Every command accepts every flag so that editor integrations can pass one
//! fixed set of options; flags a command ignores are hidden from `--help`.

use clap::Command;

use super::args::*;

/// Add hidden tree dump args (for commands that don't print the tree).
fn with_hidden_tree_args(cmd: Command) -> Command {
    cmd.arg(trivia_arg().hide(true))
        .arg(spans_arg().hide(true))
}

/// Add hidden tag metadata args (for commands that don't consult the index).
fn with_hidden_index_args(cmd: Command) -> Command {
    cmd.arg(taginfo_arg().hide(true))
        .arg(max_distance_arg().hide(true))
}

/// Add hidden cursor args (for commands that work on the whole query).
fn with_hidden_cursor_args(cmd: Command) -> Command {
    cmd.arg(offset_arg().hide(true))
}

/// Add hidden JSON output args (for commands that only print text).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(json_arg().hide(true))
        .arg(compact_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("oql")
        .about("Parser, linter and completion engine for Overpass QL fragments")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(ast_command())
        .subcommand(lint_command())
        .subcommand(complete_command())
        .subcommand(highlight_command())
        .subcommand(hover_command())
}

/// Report syntax errors.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report syntax errors in a query")
        .override_usage(
            "\
  oql check <FILE>
  oql check -q <TEXT>
  oql check -",
        )
        .after_help(
            r#"EXAMPLES:
  oql check query.oql                 # validate a file
  oql check -q 'node[amenity=cafe];'  # inline query
  cat query.oql | oql check -         # read stdin"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(color_arg());

    with_hidden_output_args(with_hidden_cursor_args(with_hidden_index_args(
        with_hidden_tree_args(cmd),
    )))
}

/// Print the concrete syntax tree.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the syntax tree of a query")
        .override_usage(
            "\
  oql ast <FILE> [--trivia] [--spans]
  oql ast -q <TEXT> [--trivia] [--spans]",
        )
        .after_help(
            r#"EXAMPLES:
  oql ast query.oql                   # structure only
  oql ast query.oql --trivia --spans  # every token with byte ranges
  oql ast -q 'way[highway];'          # inline query"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(trivia_arg())
        .arg(spans_arg())
        .arg(color_arg());

    with_hidden_output_args(with_hidden_cursor_args(with_hidden_index_args(cmd)))
}

/// Syntax errors plus lints against the tag index.
pub fn lint_command() -> Command {
    let cmd = Command::new("lint")
        .about("Report syntax errors and lints")
        .override_usage(
            "\
  oql lint <FILE> [--taginfo <PATH>]
  oql lint -q <TEXT> [--taginfo <PATH>]",
        )
        .after_help(
            r#"EXAMPLES:
  oql lint query.oql --taginfo keys.json  # unknown keys and values
  oql lint -q 'out;'                      # statement lints only
  OQL_TAGINFO=keys.json oql lint query.oql --json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(taginfo_arg())
        .arg(max_distance_arg())
        .arg(json_arg())
        .arg(compact_arg())
        .arg(color_arg());

    with_hidden_cursor_args(with_hidden_tree_args(cmd))
}

/// Completion candidates at a cursor position.
pub fn complete_command() -> Command {
    let cmd = Command::new("complete")
        .about("List completion candidates at a cursor position as JSON")
        .override_usage(
            "\
  oql complete <FILE> --offset <N> [--taginfo <PATH>]
  oql complete -q <TEXT> --offset <N> [--taginfo <PATH>]",
        )
        .after_help(
            r#"EXAMPLES:
  oql complete -q 'node[' --offset 5 --taginfo keys.json  # tag keys
  oql complete -q 'node({{' --offset 7                    # macro names"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(offset_arg().required(true))
        .arg(taginfo_arg())
        .arg(compact_arg())
        .arg(color_arg())
        .arg(max_distance_arg().hide(true))
        .arg(json_arg().hide(true));

    with_hidden_tree_args(cmd)
}

/// Print the query with ANSI colors.
pub fn highlight_command() -> Command {
    let cmd = Command::new("highlight")
        .about("Print a query with syntax highlighting")
        .override_usage(
            "\
  oql highlight <FILE>
  oql highlight -q <TEXT> [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  oql highlight query.oql                # colored source
  oql highlight -q 'node[name~"^A"];' --json  # styled spans"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(json_arg())
        .arg(compact_arg())
        .arg(color_arg());

    with_hidden_cursor_args(with_hidden_index_args(with_hidden_tree_args(cmd)))
}

/// Describe the tag filter under the cursor.
pub fn hover_command() -> Command {
    let cmd = Command::new("hover")
        .about("Describe the tag filter at a cursor position")
        .override_usage(
            "\
  oql hover <FILE> --offset <N> --taginfo <PATH>
  oql hover -q <TEXT> --offset <N> --taginfo <PATH>",
        )
        .after_help(
            r#"EXAMPLES:
  oql hover -q 'way[highway=primary];' --offset 5 --taginfo keys.json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(offset_arg().required(true))
        .arg(taginfo_arg())
        .arg(json_arg())
        .arg(compact_arg())
        .arg(color_arg())
        .arg(max_distance_arg().hide(true));

    with_hidden_tree_args(cmd)
}
