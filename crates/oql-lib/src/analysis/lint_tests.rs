use std::sync::Arc;

use indoc::indoc;
use oql_core::{TagIndex, TagKey};

use super::lint::requote;
use super::{Analyzer, LintConfig};
use crate::diagnostics::{DiagnosticKind, Severity};
use crate::parser::parse;

fn analyzer() -> Analyzer {
    Analyzer::new(Arc::new(TagIndex::from_keys([
        TagKey::new("highway").with_values(["primary", "trunk"]),
        TagKey {
            count_all: 10,
            ..TagKey::new("name")
        },
        TagKey {
            count_all: 50,
            ..TagKey::new("nmea")
        },
        TagKey {
            count_all: 1000,
            ..TagKey::new("note")
        },
    ])))
}

fn lint(analyzer: &Analyzer, source: &str) -> String {
    analyzer
        .lint(&parse(source))
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn known_tag_is_clean() {
    let diagnostics = analyzer().lint(&parse(r#"node["highway"="primary"];"#));
    assert!(diagnostics.is_empty());
}

#[test]
fn unknown_value_suggests_close_values() {
    let source = r#"node["highway"="primaryy"];"#;
    let diagnostics = analyzer().lint(&parse(source));
    assert_eq!(diagnostics.len(), 1);

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.severity(), Severity::Hint);
    assert_eq!(diag.kind(), DiagnosticKind::UnknownTagValue);
    insta::assert_snapshot!(diag.to_string(), @"hint at 15..25: unknown value `primaryy` for key `highway` (fix: replace with `primary`)");
    assert_eq!(
        diag.apply_fix(source, 0).as_deref(),
        Some(r#"node["highway"="primary"];"#)
    );
}

#[test]
fn unknown_key_fixes_are_ranked() {
    insta::assert_snapshot!(
        lint(&analyzer(), "node[nme];"),
        @"hint at 5..8: unknown tag key `nme` (fix: replace with `nmea`) (fix: replace with `name`) (fix: replace with `note`)"
    );
}

#[test]
fn max_distance_limits_fixes() {
    let analyzer = analyzer().with_config(LintConfig::default().with_max_distance(1));
    insta::assert_snapshot!(
        lint(&analyzer, "node[nme];"),
        @"hint at 5..8: unknown tag key `nme` (fix: replace with `nmea`) (fix: replace with `name`)"
    );
}

#[test]
fn unknown_key_without_suggestions() {
    insta::assert_snapshot!(
        lint(&analyzer(), "way[surface=asphalt];"),
        @"hint at 4..11: unknown tag key `surface`"
    );
}

#[test]
fn fixes_keep_quoting() {
    let source = "node['nme'];";
    let diagnostics = analyzer().lint(&parse(source));
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.fixes()[0].replacement(), "'nmea'");
    assert_eq!(diag.apply_fix(source, 1).as_deref(), Some("node['name'];"));
}

#[test]
fn out_is_disallowed() {
    let source = "out;";
    let diagnostics = analyzer().lint(&parse(source));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    insta::assert_snapshot!(lint(&analyzer(), source), @"error at 0..4: `out` statements are not allowed (fix: remove statement) (hint: output is added by the generated request)");

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.apply_fix(source, 0).as_deref(), Some(""));
}

#[test]
fn removing_out_keeps_neighbours() {
    let source = "node;\n.a out geom;\nway;";
    let diagnostics = analyzer().lint(&parse(source));
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::DisallowedOut);
    assert_eq!(diag.apply_fix(source, 0).as_deref(), Some("node;\n\nway;"));
}

#[test]
fn settings_are_disallowed() {
    insta::assert_snapshot!(
        lint(&analyzer(), "[out:json][timeout:25];"),
        @"error at 0..23: settings are not allowed (fix: remove statement) (hint: queries are embedded in a generated request that sets its own options)"
    );
}

#[test]
fn diagnostics_follow_tree_order() {
    let source = indoc! {"
        [out:json];
        node[nme];
        (way[highway=primaryy]; out;);
    "};
    let kinds: Vec<_> = analyzer()
        .lint(&parse(source))
        .iter()
        .map(|d| d.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::DisallowedSettings,
            DiagnosticKind::UnknownTagKey,
            DiagnosticKind::UnknownTagValue,
            DiagnosticKind::DisallowedOut,
        ]
    );
}

#[test]
fn repeated_unknown_keys_are_not_deduplicated() {
    let diagnostics = analyzer().lint(&parse("node[nme]; way[nme];"));
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn value_of_unknown_key_is_not_checked() {
    let diagnostics = analyzer().lint(&parse("node[surface=asphlt];"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().kind(),
        DiagnosticKind::UnknownTagKey
    );
}

#[test]
fn empty_index_only_flags_statements() {
    let analyzer = Analyzer::new(Arc::new(TagIndex::new()));
    insta::assert_snapshot!(
        lint(&analyzer, "node[foo=bar]; out;"),
        @"error at 15..19: `out` statements are not allowed (fix: remove statement) (hint: output is added by the generated request)"
    );
}

#[test]
fn broken_trees_do_not_panic() {
    let source = r#"node["highway"="primaryy"; .a out (way[nme; -[timeout:"#;
    let analyzer = analyzer();
    for end in 0..=source.len() {
        let _ = analyzer.lint(&parse(&source[..end]));
    }
}

#[test]
fn lint_render_uses_snippets() {
    let source = r#"node["highway"="primaryy"];"#;
    let rendered = analyzer().lint(&parse(source)).render(source);
    assert!(rendered.contains("unknown value `primaryy` for key `highway`"));
    assert!(rendered.contains("replace with `primary`"));
}

#[test]
fn requote_matches_original() {
    assert_eq!(requote("nme", "name"), "name");
    assert_eq!(requote("\"nme\"", "name"), "\"name\"");
    assert_eq!(requote("'nme'", "name"), "'name'");
    assert_eq!(requote("Mian", "Main Street"), "\"Main Street\"");
    assert_eq!(requote("'x'", "it's"), r"'it\'s'");
    assert_eq!(requote("addr:ctiy", "addr:city"), "addr:city");
}
