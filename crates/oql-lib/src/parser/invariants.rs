//! Parser invariant checks, excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use rowan::GreenNode;

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    /// Every lookahead burns fuel; every consumed token refills it.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        let fuel = self.debug_fuel.get();
        assert!(fuel != 0, "parser is stuck: lookahead without consuming input");
        self.debug_fuel.set(fuel - 1);
    }

    #[inline]
    pub(super) fn assert_current(&mut self, expected_kind: SyntaxKind) {
        let current_kind = self.current();
        assert_eq!(
            current_kind, expected_kind,
            "broken parser invariant: production for {:?} entered at {:?}",
            expected_kind, current_kind,
        );
    }
}

/// The tree is lossless: the root covers every byte of the source.
pub(super) fn assert_lossless(source: &str, green: &GreenNode) {
    assert_eq!(
        usize::from(green.text_len()),
        source.len(),
        "broken parser invariant: tree does not cover the source"
    );
}
