// crates/rewrite_mac_markers/src/lib.rs

//! The marker-substitution engine: rewrites platform-conditional comment
//! markers into their normalized, toggleable comment form.
//!
//! Each marker tag is matched together with whatever run of comment-delimiter
//! characters (`*` or `/`) currently surrounds it, and the whole occurrence is
//! replaced by a fixed normalized spelling. Matching delimiter runs instead of
//! one exact prior form is what keeps repeated runs stable: a second pass maps
//! every normalized marker back onto itself instead of stacking delimiters.

use mac_marker::{ELSE_IF_MAC, ELSE_IF_NOT_MAC, END_MAC, END_NOT_MAC, IF_MAC, IF_NOT_MAC};
use once_cell::sync::Lazy;
use regex::Regex;

/// The six platform-conditional marker tags recognized by the rewriter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    IfNotMac,
    EndNotMac,
    IfMac,
    EndMac,
    ElseIfMac,
    ElseIfNotMac,
}

impl MarkerKind {
    /// Every marker kind, in the canonical rule-table order.
    pub const ALL: [MarkerKind; 6] = [
        MarkerKind::IfNotMac,
        MarkerKind::EndNotMac,
        MarkerKind::IfMac,
        MarkerKind::EndMac,
        MarkerKind::ElseIfMac,
        MarkerKind::ElseIfNotMac,
    ];

    /// The literal tag text as it appears inside a source comment.
    pub fn tag(self) -> &'static str {
        match self {
            MarkerKind::IfNotMac => IF_NOT_MAC,
            MarkerKind::EndNotMac => END_NOT_MAC,
            MarkerKind::IfMac => IF_MAC,
            MarkerKind::EndMac => END_MAC,
            MarkerKind::ElseIfMac => ELSE_IF_MAC,
            MarkerKind::ElseIfNotMac => ELSE_IF_NOT_MAC,
        }
    }

    /// The normalized comment form every occurrence of this tag is rewritten to.
    ///
    /// The `IF-NOT-MAC`/`END-NOT-MAC` pair stays inert as line comments; the
    /// Mac-side markers actively open (`/*`) and close (`*/`) a block comment
    /// so the Mac branch becomes dead code in the rewritten sources.
    pub fn replacement(self) -> &'static str {
        match self {
            MarkerKind::IfNotMac => "//IF-NOT-MAC",
            MarkerKind::EndNotMac => "//END-NOT-MAC",
            MarkerKind::IfMac => "/*IF-MAC",
            MarkerKind::EndMac => "//END-MAC*/",
            MarkerKind::ElseIfMac => "/*ELSE-IF-MAC",
            MarkerKind::ElseIfNotMac => "//ELSE-IF-NOT-MAC*/",
        }
    }

    /// True if the normalized form of this tag opens a block comment.
    pub fn opens_block(self) -> bool {
        matches!(self, MarkerKind::IfMac | MarkerKind::ElseIfMac)
    }

    /// True if the normalized form of this tag closes a block comment.
    pub fn closes_block(self) -> bool {
        matches!(self, MarkerKind::EndMac | MarkerKind::ElseIfNotMac)
    }

    /// Maps literal tag text back to its kind.
    pub fn from_tag(tag: &str) -> Option<MarkerKind> {
        MarkerKind::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }
}

/// One find-and-replace rule: a delimiter-tolerant pattern for a single tag
/// paired with the literal text every occurrence is replaced by.
pub struct RewriteRule {
    kind: MarkerKind,
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(kind: MarkerKind) -> Self {
        // One-or-more delimiters before the tag, any run after it. Requiring a
        // leading delimiter also keeps a tag embedded in a longer tag (IF-MAC
        // inside ELSE-IF-MAC) from matching, since there the preceding
        // character is part of the longer tag's text.
        let pattern = Regex::new(&format!(r"[*/]+{}[*/]*", kind.tag()))
            .expect("marker tags form valid patterns");
        Self {
            kind,
            pattern,
            replacement: kind.replacement(),
        }
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn replacement(&self) -> &'static str {
        self.replacement
    }

    /// Rewrites every occurrence of this rule's marker in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

static REWRITE_TABLE: Lazy<Vec<RewriteRule>> =
    Lazy::new(|| MarkerKind::ALL.iter().map(|&kind| RewriteRule::new(kind)).collect());

/// The full rule table in its canonical order.
pub fn rewrite_rules() -> &'static [RewriteRule] {
    &REWRITE_TABLE
}

/// Rewrites every marker occurrence in `text` into its normalized form.
///
/// Rules are applied sequentially, each as a global pass over the result of
/// the previous one. Text without markers passes through unchanged, as do
/// malformed fragments (a bare tag with no adjacent delimiter is left alone).
pub fn rewrite_markers(text: &str) -> String {
    rewrite_rules()
        .iter()
        .fold(text.to_owned(), |doc, rule| rule.apply(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through_without_markers() {
        let input = "public class Core {\n    // plain comment, no tags\n    int x = 0;\n}\n";
        assert_eq!(rewrite_markers(input), input);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(rewrite_markers(""), "");
    }

    #[test]
    fn test_per_marker_exactness() {
        assert_eq!(rewrite_markers("/*IF-NOT-MAC*/"), "//IF-NOT-MAC");
        assert_eq!(rewrite_markers("//END-NOT-MAC*/"), "//END-NOT-MAC");
        assert_eq!(rewrite_markers("/IF-MAC/"), "/*IF-MAC");
        assert_eq!(rewrite_markers("**END-MAC**"), "//END-MAC*/");
        assert_eq!(rewrite_markers("*ELSE-IF-MAC*"), "/*ELSE-IF-MAC");
        assert_eq!(rewrite_markers("/ELSE-IF-NOT-MAC/"), "//ELSE-IF-NOT-MAC*/");
    }

    #[test]
    fn test_bare_tag_is_not_matched() {
        // The pattern requires at least one delimiter before the tag, so a tag
        // mentioned outside a comment delimiter run is left untouched.
        let input = "String s = \"IF-MAC\";\n";
        assert_eq!(rewrite_markers(input), input);
    }

    #[test]
    fn test_multiplicity_with_varying_delimiter_noise() {
        let input = "/*IF-MAC\nimport com.apple.mrj.*;\n//IF-MAC//\nint a;\n///IF-MAC*\n";
        let output = rewrite_markers(input);
        assert_eq!(output.matches("/*IF-MAC").count(), 3);
        assert_eq!(output, "/*IF-MAC\nimport com.apple.mrj.*;\n/*IF-MAC\nint a;\n/*IF-MAC\n");
    }

    #[test]
    fn test_non_interference_between_marker_kinds() {
        let input = "\
header();
/*IF-NOT-MAC
windowsSetup();
//END-NOT-MAC*/
/*IF-MAC*/
macSetup();
**END-MAC**
*ELSE-IF-MAC*
macOnly();
/ELSE-IF-NOT-MAC/
footer();
";
        let expected = "\
header();
//IF-NOT-MAC
windowsSetup();
//END-NOT-MAC
/*IF-MAC
macSetup();
//END-MAC*/
/*ELSE-IF-MAC
macOnly();
//ELSE-IF-NOT-MAC*/
footer();
";
        assert_eq!(rewrite_markers(input), expected);
    }

    #[test]
    fn test_embedded_tag_is_not_cross_matched() {
        // ELSE-IF-MAC contains IF-MAC and ELSE-IF-NOT-MAC contains IF-NOT-MAC;
        // the delimiter anchor keeps the shorter rules from firing inside them.
        assert_eq!(rewrite_markers("/*ELSE-IF-MAC*/"), "/*ELSE-IF-MAC");
        assert_eq!(rewrite_markers("//ELSE-IF-NOT-MAC"), "//ELSE-IF-NOT-MAC*/");
    }

    #[test]
    fn test_idempotent_on_raw_and_normalized_forms() {
        let raw = "\
/*IF-NOT-MAC
a();
//END-NOT-MAC*/
//IF-MAC
b();
//END-MAC
";
        let once = rewrite_markers(raw);
        let twice = rewrite_markers(&once);
        assert_eq!(once, twice);

        // Every replacement string is itself a fixed point.
        for kind in MarkerKind::ALL {
            assert_eq!(rewrite_markers(kind.replacement()), kind.replacement());
        }
    }

    #[test]
    fn test_order_independence_over_line_separated_markers() {
        let input = "\
begin();
//IF-NOT-MAC
notMac();
//END-NOT-MAC
/*IF-MAC*/
mac();
/END-MAC/
*ELSE-IF-MAC*
other();
//ELSE-IF-NOT-MAC
end();
";
        let canonical = rewrite_markers(input);
        for order in permutations(rewrite_rules().len()) {
            let mut doc = input.to_owned();
            for index in order {
                doc = rewrite_rules()[index].apply(&doc);
            }
            assert_eq!(doc, canonical);
        }
    }

    #[test]
    fn test_partial_marker_fragments_pass_through() {
        let input = "// IF-MAC with a space is not a delimiter run\nIF-\n*IF-\n";
        assert_eq!(rewrite_markers(input), input);
    }

    #[test]
    fn test_from_tag_round_trip() {
        for kind in MarkerKind::ALL {
            assert_eq!(MarkerKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(MarkerKind::from_tag("IF-LINUX"), None);
    }

    /// All orderings of `0..n`, generated recursively.
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        fn recurse(remaining: &[usize], prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            if remaining.is_empty() {
                out.push(prefix.clone());
                return;
            }
            for (i, &item) in remaining.iter().enumerate() {
                let mut rest = remaining.to_vec();
                rest.remove(i);
                prefix.push(item);
                recurse(&rest, prefix, out);
                prefix.pop();
            }
        }
        let items: Vec<usize> = (0..n).collect();
        let mut out = Vec::new();
        recurse(&items, &mut Vec::new(), &mut out);
        out
    }
}
