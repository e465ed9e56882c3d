//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Unified flags: every command accepts every other command's flags
//! 2. Help visibility: hidden flags don't appear in --help
//! 3. Params extraction: correct fields are extracted from ArgMatches

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{
    ast_command, check_command, complete_command, highlight_command, hover_command, lint_command,
};

#[test]
fn check_accepts_all_flags() {
    let cmd = check_command();
    let result = cmd.try_get_matches_from([
        "check",
        "query.oql",
        "--trivia",
        "--spans",
        "--taginfo",
        "keys.json",
        "--max-distance",
        "1",
        "--offset",
        "4",
        "--json",
        "--compact",
    ]);
    assert!(
        result.is_ok(),
        "check should accept unified flags: {:?}",
        result.err()
    );

    let m = result.unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.query_path, Some(PathBuf::from("query.oql")));
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn ast_extracts_tree_flags() {
    let cmd = ast_command();
    let m = cmd
        .try_get_matches_from(["ast", "-q", "node;", "--trivia", "--color", "never"])
        .unwrap();
    let params = AstParams::from_matches(&m);

    assert_eq!(params.query_text.as_deref(), Some("node;"));
    assert!(params.query_path.is_none());
    assert!(params.trivia);
    assert!(!params.spans);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn lint_extracts_index_flags() {
    let cmd = lint_command();
    let m = cmd
        .try_get_matches_from([
            "lint",
            "query.oql",
            "--taginfo",
            "keys.json",
            "--max-distance",
            "1",
            "--json",
            "--offset",
            "3",
        ])
        .unwrap();
    let params = LintParams::from_matches(&m);

    let taginfo = params.taginfo.unwrap();
    assert_eq!(taginfo.path, PathBuf::from("keys.json"));
    assert!(taginfo.required);
    assert_eq!(params.max_distance, 1);
    assert!(params.json);
}

#[test]
fn lint_defaults() {
    let m = lint_command()
        .try_get_matches_from(["lint", "-q", "out;"])
        .unwrap();
    let params = LintParams::from_matches(&m);
    assert_eq!(params.max_distance, 2);
    assert!(!params.json);
    assert!(!params.compact);
}

#[test]
fn complete_requires_offset() {
    let result = complete_command().try_get_matches_from(["complete", "-q", "node["]);
    assert!(result.is_err(), "complete without --offset should fail");

    let m = complete_command()
        .try_get_matches_from(["complete", "-q", "node[", "--offset", "5", "--trivia"])
        .unwrap();
    let params = CompleteParams::from_matches(&m);
    assert_eq!(params.offset, 5);
    assert_eq!(params.query_text.as_deref(), Some("node["));
}

#[test]
fn hover_requires_offset() {
    let result = hover_command().try_get_matches_from(["hover", "query.oql"]);
    assert!(result.is_err(), "hover without --offset should fail");

    let m = hover_command()
        .try_get_matches_from(["hover", "query.oql", "--offset", "7", "--json"])
        .unwrap();
    let params = HoverParams::from_matches(&m);
    assert_eq!(params.offset, 7);
    assert!(params.json);
}

#[test]
fn offset_must_be_a_number() {
    let result =
        complete_command().try_get_matches_from(["complete", "-q", "node", "--offset", "-1"]);
    assert!(result.is_err());
}

#[test]
fn query_text_conflicts_with_path() {
    let result = check_command().try_get_matches_from(["check", "query.oql", "-q", "node;"]);
    assert!(result.is_err());
}

#[test]
fn highlight_accepts_all_flags() {
    let m = highlight_command()
        .try_get_matches_from([
            "highlight",
            "-",
            "--json",
            "--taginfo",
            "keys.json",
            "--offset",
            "1",
            "--spans",
        ])
        .unwrap();
    let params = HighlightParams::from_matches(&m);
    assert_eq!(params.query_path, Some(PathBuf::from("-")));
    assert!(params.json);
}

#[test]
fn color_values_are_validated() {
    let result = check_command().try_get_matches_from(["check", "-q", "node;", "--color", "sometimes"]);
    assert!(result.is_err());

    let m = check_command()
        .try_get_matches_from(["check", "-q", "node;", "--color", "always"])
        .unwrap();
    assert_eq!(CheckParams::from_matches(&m).color, ColorChoice::Always);
}

#[test]
fn check_help_hides_unified_flags() {
    let mut cmd = check_command();
    let help = cmd.render_help().to_string();

    assert!(!help.contains("--taginfo"), "check help should not show --taginfo");
    assert!(!help.contains("--offset"), "check help should not show --offset");
    assert!(!help.contains("--trivia"), "check help should not show --trivia");
    assert!(!help.contains("--json"), "check help should not show --json");
    assert!(help.contains("--color"));
}

#[test]
fn ast_help_shows_tree_flags() {
    let mut cmd = ast_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--trivia"));
    assert!(help.contains("--spans"));
    assert!(!help.contains("--max-distance"), "ast help should not show --max-distance");
}

#[test]
fn lint_help_hides_cursor_flags() {
    let mut cmd = lint_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--taginfo"));
    assert!(help.contains("OQL_TAGINFO"));
    assert!(!help.contains("--offset"), "lint help should not show --offset");
    assert!(!help.contains("--spans"), "lint help should not show --spans");
}

#[test]
fn complete_help_hides_lint_flags() {
    let mut cmd = complete_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--offset"));
    assert!(!help.contains("--max-distance"), "complete help should not show --max-distance");
    assert!(!help.contains("Print JSON instead of text"));
}

#[test]
fn cli_lists_all_commands() {
    let cli = build_cli();
    let names: Vec<_> = cli.get_subcommands().map(|c| c.get_name()).collect();
    assert_eq!(
        names,
        ["check", "ast", "lint", "complete", "highlight", "hover"]
    );
}
