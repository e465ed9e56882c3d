//! Keystroke-by-keystroke typing: every prefix of a valid program parses.

use indoc::indoc;

use crate::parser::{SyntaxKind, parse};

const PROGRAMS: &[&str] = &[
    r#"node["highway"="trunk"];"#,
    r#"node["highway"="trunk"]({{bbox}});"#,
    "{{geocodeArea:\"Japan\"@ja; Italia@es}}->.japan;",
    " way[\"asdllsdf\"](around.hey:8); ",
    "[out:json][timeout:25][bbox:{{bbox}}];",
    "way[name~\"^Main\",i][!ref](50.6,7.0,50.8,7.2);",
    "(.a; - node[~\"^addr:\"~\".\"];)->.b;",
    ".shops foreach->.s(node.s[name]; .s <; >>;);",
    "is_in(50.7,7.1)->.areas; area.areas[admin_level=\"8\"]; .result out geom 5;",
    indoc! {r#"
    /// Benches
    (
      node[amenity=bench](area.city); // benches
      - node[backrest=no];
    )->.benches;
    "#},
];

#[test]
fn every_prefix_parses_losslessly() {
    for program in PROGRAMS {
        for end in 0..=program.len() {
            if !program.is_char_boundary(end) {
                continue;
            }
            let prefix = &program[..end];
            let parse = parse(prefix);
            let root = parse.syntax();
            assert_eq!(root.kind(), SyntaxKind::Oql);
            assert_eq!(root.text().to_string(), prefix, "prefix {prefix:?}");
        }
    }
}

#[test]
fn every_suffix_parses_losslessly() {
    for program in PROGRAMS {
        for start in 0..=program.len() {
            if !program.is_char_boundary(start) {
                continue;
            }
            let suffix = &program[start..];
            assert_eq!(parse(suffix).syntax().text().to_string(), suffix);
        }
    }
}

#[test]
fn full_programs_are_valid() {
    for program in PROGRAMS {
        let parse = parse(program);
        assert!(parse.is_valid(), "{program:?}: {}", parse.dump_diagnostics());
        assert!(
            parse.syntax().descendants().all(|n| n.kind() != SyntaxKind::Error),
            "{program:?} contains error nodes"
        );
    }
}

#[test]
fn statement_spans_partition_the_input() {
    for program in PROGRAMS {
        let parse = parse(program);
        let mut rebuilt = String::new();
        let mut covered = 0usize;
        for stmt in parse.statements() {
            let range = stmt.as_cst().text_range();
            let start = usize::from(range.start());
            // Only trivia may sit between statements.
            assert!(program[covered..start].trim().is_empty() || is_comment(&program[covered..start]));
            rebuilt.push_str(&program[covered..start]);
            rebuilt.push_str(&stmt.as_cst().text().to_string());
            covered = usize::from(range.end());
        }
        rebuilt.push_str(&program[covered..]);
        assert_eq!(&rebuilt, program);
    }
}

fn is_comment(gap: &str) -> bool {
    gap.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("//") || line.starts_with("/*"))
}

#[test]
fn every_statement_is_terminated() {
    for program in PROGRAMS {
        for stmt in parse(program).statements() {
            assert!(stmt.is_terminated(), "{program:?}: {}", stmt.as_cst().text());
        }
    }
}
