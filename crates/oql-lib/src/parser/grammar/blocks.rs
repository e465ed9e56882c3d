use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    /// `"(" ... ")" Assignment? ";"` as `Union`, `Difference` or `Group`.
    ///
    /// A `-` right after the first statement makes the block a difference;
    /// `()` is an empty group.
    pub(super) fn parse_block(&mut self) {
        let checkpoint = self.checkpoint();
        let open = self.current_span();
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        if self.currently_is(SyntaxKind::ParenClose) {
            self.start_node_at(checkpoint, SyntaxKind::Group);
            let close = self.current_span();
            self.pop_delimiter();
            self.bump();
            self.error_at(
                DiagnosticKind::EmptyGroup,
                TextRange::new(open.start(), close.end()),
            );
            self.parse_assignment_opt();
            self.parse_terminator();
            self.finish_node();
            return;
        }

        if !self.enter_recursion() {
            self.start_node_at(checkpoint, SyntaxKind::Union);
            self.pop_delimiter();
            self.finish_node();
            return;
        }

        if !self.at_end() {
            self.parse_statement();
        }

        let kind = if self.currently_is(SyntaxKind::Minus) {
            self.parse_difference_tail();
            SyntaxKind::Difference
        } else {
            self.parse_union_tail();
            SyntaxKind::Union
        };

        self.exit_recursion();
        self.start_node_at(checkpoint, kind);
        self.close_delimiter(SyntaxKind::ParenClose);
        self.parse_assignment_opt();
        self.parse_terminator();
        self.finish_node();
    }

    fn parse_union_tail(&mut self) {
        while !self.at_end() && !self.currently_is(SyntaxKind::ParenClose) {
            if self.currently_is(SyntaxKind::Minus) {
                self.error_and_bump_msg(
                    DiagnosticKind::UnexpectedToken,
                    "`-` must follow the first statement of a difference",
                );
                continue;
            }
            self.parse_statement();
        }
    }

    fn parse_difference_tail(&mut self) {
        self.assert_current(SyntaxKind::Minus);
        self.bump();

        if self.at_end() || self.currently_is(SyntaxKind::ParenClose) {
            self.error(DiagnosticKind::ExpectedStatement);
            return;
        }
        self.parse_statement();

        while !self.at_end() && !self.currently_is(SyntaxKind::ParenClose) {
            self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "a difference takes exactly two statements",
            );
            if self.currently_is(SyntaxKind::Minus) {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "unexpected `-`");
                continue;
            }
            self.parse_statement();
        }
    }
}
