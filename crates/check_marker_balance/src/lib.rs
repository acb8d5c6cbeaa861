// crates/check_marker_balance/src/lib.rs

//! Validation pass over a source document's platform-conditional markers.
//!
//! The rewriter itself never checks pairing: `IF-MAC`/`ELSE-IF-MAC` open a
//! block comment in the rewritten form and rely on a later `END-MAC` or
//! `ELSE-IF-NOT-MAC` to close it. An unpaired opener would therefore leave an
//! unterminated block comment behind. This pass scans marker occurrences in
//! document order and reports every pairing violation without modifying the
//! text; the `IF-NOT-MAC`/`END-NOT-MAC` pair never affects block state.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rewrite_mac_markers::MarkerKind;

/// How a marker occurrence violates block pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// An opener was found while a previous block was still open.
    NestedOpen,
    /// A closer was found with no block open.
    UnmatchedClose,
    /// The document ended with a block still open.
    UnterminatedBlock,
}

/// One pairing violation, located by 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceIssue {
    pub line: usize,
    pub kind: IssueKind,
    pub tag: &'static str,
}

impl fmt::Display for BalanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::NestedOpen => {
                write!(f, "line {}: {} opens a block while one is already open", self.line, self.tag)
            }
            IssueKind::UnmatchedClose => {
                write!(f, "line {}: {} closes a block that was never opened", self.line, self.tag)
            }
            IssueKind::UnterminatedBlock => {
                write!(f, "line {}: block opened by {} is never closed", self.line, self.tag)
            }
        }
    }
}

// A single alternation keeps an embedded shorter tag (IF-MAC inside
// ELSE-IF-MAC) from being counted as its own occurrence: the leftmost match
// starts at the longer tag and consumes past the embedded one.
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    let mut tags: Vec<&str> = MarkerKind::ALL.iter().map(|kind| kind.tag()).collect();
    tags.sort_by_key(|tag| std::cmp::Reverse(tag.len()));
    Regex::new(&tags.join("|")).expect("marker tags form a valid alternation")
});

/// Scans `text` for block-pairing violations among its markers.
///
/// Returns an empty vec for balanced input, including input with no markers
/// at all. The scan never fails and never modifies the text.
pub fn check_marker_balance(text: &str) -> Vec<BalanceIssue> {
    let mut issues = Vec::new();
    let mut open: Option<(usize, &'static str)> = None;

    for found in TAG_RE.find_iter(text) {
        let Some(kind) = MarkerKind::from_tag(found.as_str()) else {
            continue;
        };
        let line = line_of(text, found.start());
        if kind.opens_block() {
            if open.is_some() {
                issues.push(BalanceIssue { line, kind: IssueKind::NestedOpen, tag: kind.tag() });
            }
            open = Some((line, kind.tag()));
        } else if kind.closes_block() {
            if open.take().is_none() {
                issues.push(BalanceIssue { line, kind: IssueKind::UnmatchedClose, tag: kind.tag() });
            }
        }
    }

    if let Some((line, tag)) = open {
        issues.push(BalanceIssue { line, kind: IssueKind::UnterminatedBlock, tag });
    }
    issues
}

fn line_of(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].bytes().filter(|&b| b == b'\n').count() + 1
}
