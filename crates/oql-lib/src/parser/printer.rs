//! Text dumps of parse trees, used by the CLI and by snapshot tests.

use std::fmt::Write;

use rowan::NodeOrToken;

use super::ast::{self, Statement, TagOp};
use super::cst::SyntaxNode;

pub struct CstPrinter {
    root: SyntaxNode,
    raw: bool,
    trivia: bool,
    spans: bool,
}

impl CstPrinter {
    pub fn new(root: SyntaxNode) -> Self {
        Self {
            root,
            raw: true,
            trivia: false,
            spans: false,
        }
    }

    /// `true` dumps every node and token; `false` prints a statement outline.
    pub fn raw(mut self, value: bool) -> Self {
        self.raw = value;
        self
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.raw {
            self.format_cst(&self.root, 0, w)
        } else {
            self.format_outline(w)
        }
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());

        writeln!(w, "{}{:?}{}", prefix, node.kind(), span)?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_cst(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        let child_prefix = "  ".repeat(indent + 1);
                        let child_span = self.span_str(t.text_range());
                        writeln!(
                            w,
                            "{}{:?}{} {:?}",
                            child_prefix,
                            t.kind(),
                            child_span,
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn format_outline(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(root) = ast::Oql::cast(self.root.clone()) else {
            return self.format_cst(&self.root, 0, w);
        };
        writeln!(w, "Oql{}", self.span_str(root.as_cst().text_range()))?;
        for stmt in root.statements() {
            self.format_statement(&stmt, 1, w)?;
        }
        Ok(())
    }

    fn format_statement(
        &self,
        stmt: &Statement,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(stmt.as_cst().text_range());
        let kind = stmt.as_cst().kind();

        match stmt {
            Statement::Query(q) => {
                let selector = match (q.keyword(), q.selector_macro()) {
                    (Some(kw), _) => format!(" {}", kw.text()),
                    (None, Some(m)) => format!(" {{{{{}}}}}", name_or_missing(m.name())),
                    (None, None) => String::new(),
                };
                let input = set_suffix(q.input_set());
                let output = assignment_suffix(q.assignment());
                writeln!(w, "{prefix}Query{span}{selector}{input}{output}")?;
                for filter in q.square_filters() {
                    self.format_tag(filter.tag(), indent + 1, w)?;
                }
                for filter in q.round_filters() {
                    let text: String = filter.as_cst().text().to_string();
                    writeln!(w, "{}Filter {}", "  ".repeat(indent + 1), text.trim())?;
                }
            }
            Statement::Union(u) => {
                writeln!(w, "{prefix}Union{span}{}", assignment_suffix(u.assignment()))?;
                for s in u.statements() {
                    self.format_statement(&s, indent + 1, w)?;
                }
            }
            Statement::Difference(d) => {
                writeln!(w, "{prefix}Difference{span}{}", assignment_suffix(d.assignment()))?;
                for s in [d.minuend(), d.subtrahend()].into_iter().flatten() {
                    self.format_statement(&s, indent + 1, w)?;
                }
            }
            Statement::Foreach(f) => {
                writeln!(w, "{prefix}Foreach{span}{}", set_suffix(f.input_set()))?;
                for s in f.body() {
                    self.format_statement(&s, indent + 1, w)?;
                }
            }
            Statement::Settings(s) => {
                writeln!(w, "{prefix}Settings{span}")?;
                for (name, value) in s.entries() {
                    writeln!(
                        w,
                        "{}{}: {}",
                        "  ".repeat(indent + 1),
                        name.as_deref().unwrap_or("?"),
                        value.as_deref().unwrap_or("?")
                    )?;
                }
            }
            Statement::Out(o) => {
                let mods = o.modifiers();
                let input = set_suffix(o.input_set());
                if mods.is_empty() {
                    writeln!(w, "{prefix}Out{span}{input}")?;
                } else {
                    writeln!(w, "{prefix}Out{span}{input} {}", mods.join(" "))?;
                }
            }
            Statement::IsIn(i) => writeln!(w, "{prefix}IsIn{span}{}", set_suffix(i.input_set()))?,
            Statement::Group(_) => writeln!(w, "{prefix}Group{span}")?,
            Statement::Recurse(r) => {
                let input = set_suffix(r.input_set());
                let output = assignment_suffix(r.assignment());
                writeln!(w, "{prefix}{kind:?}{span}{input}{output}")?;
            }
        }
        Ok(())
    }

    fn format_tag(&self, tag: Option<ast::Tag>, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let Some(tag) = tag else {
            return writeln!(w, "{prefix}Tag?");
        };
        let span = self.span_str(tag.as_cst().text_range());
        let key = tag.key().and_then(|k| k.name()).unwrap_or_default();
        let value = tag.value().and_then(|v| v.text()).unwrap_or_default();
        let regexes: Vec<_> = tag.regexes().map(|t| t.text().to_string()).collect();
        match tag.op() {
            Some(TagOp::Exists) | None => writeln!(w, "{prefix}Tag{span} {key}"),
            Some(TagOp::NotExists) => writeln!(w, "{prefix}Tag{span} !{key}"),
            Some(TagOp::Equals) => writeln!(w, "{prefix}Tag{span} {key} = {value:?}"),
            Some(TagOp::NotEquals) => writeln!(w, "{prefix}Tag{span} {key} != {value:?}"),
            Some(TagOp::Matches) => writeln!(w, "{prefix}Tag{span} {key} ~ {}", regexes.join(" ")),
            Some(TagOp::NotMatches) => {
                writeln!(w, "{prefix}Tag{span} {key} !~ {}", regexes.join(" "))
            }
            Some(TagOp::KeyMatches) => writeln!(w, "{prefix}Tag{span} ~ {}", regexes.join(" ~ ")),
        }
    }

    fn span_str(&self, range: rowan::TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(
            " [{}..{}]",
            u32::from(range.start()),
            u32::from(range.end())
        )
    }
}

fn name_or_missing(token: Option<super::cst::SyntaxToken>) -> String {
    token.map_or_else(|| "?".to_string(), |t| t.text().to_string())
}

fn set_suffix(set: Option<ast::Set>) -> String {
    match set {
        Some(set) => format!(" .{}", name_or_missing(set.name())),
        None => String::new(),
    }
}

fn assignment_suffix(assignment: Option<ast::Assignment>) -> String {
    match assignment.and_then(|a| a.set()) {
        Some(set) => format!(" -> .{}", name_or_missing(set.name())),
        None => String::new(),
    }
}
