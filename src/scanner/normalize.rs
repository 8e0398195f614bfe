use crate::scanner::lexer::{self, TokenKind};

/// Comment-stripped, case-folded copy of a raw query.
///
/// Used exclusively for pattern matching. The original text is never
/// modified: whatever is ultimately admitted for execution is the raw input,
/// byte for byte. Deriving a view is a pure function of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedView {
    text: String,
}

impl NormalizedView {
    /// Derive the matching view: comments replaced by a single space (a SQL
    /// comment is whitespace to the engine, so `DR/**/OP` must not collapse
    /// into `DROP`), then the whole text lowercased.
    pub fn from_raw(raw: &str) -> Self {
        let mut stripped = String::with_capacity(raw.len());
        for token in lexer::tokenize(raw) {
            match token.kind {
                TokenKind::LineComment | TokenKind::BlockComment => stripped.push(' '),
                _ => stripped.push_str(token.text),
            }
        }
        Self {
            text: stripped.to_lowercase(),
        }
    }

    /// The normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when nothing but whitespace survives normalization.
    ///
    /// A comment-only input is empty here even though the raw string is not.
    pub fn is_effectively_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_for_matching() {
        let view = NormalizedView::from_raw("SELECT A FROM T");
        assert_eq!(view.text(), "select a from t");
    }

    #[test]
    fn strips_line_and_block_comments() {
        let view = NormalizedView::from_raw("SELECT 1 -- hidden DROP\n, 2 /* more */ FROM t");
        assert!(!view.text().contains("drop"));
        assert!(!view.text().contains("more"));
        assert!(view.text().contains("from t"));
    }

    #[test]
    fn comment_splice_does_not_fuse_words() {
        // DR/**/OP is two tokens to a SQL engine, so it must stay two words.
        let view = NormalizedView::from_raw("DR/**/OP TABLE t");
        assert_eq!(view.text(), "dr op table t");
    }

    #[test]
    fn comment_only_input_is_effectively_empty() {
        assert!(NormalizedView::from_raw("-- nothing here").is_effectively_empty());
        assert!(NormalizedView::from_raw("  /* just a comment */  ").is_effectively_empty());
        assert!(!NormalizedView::from_raw("select 1").is_effectively_empty());
    }

    #[test]
    fn comment_markers_inside_literals_survive() {
        let view = NormalizedView::from_raw("SELECT '--not a comment' FROM t");
        assert!(view.text().contains("'--not a comment'"));
    }

    #[test]
    fn derivation_is_deterministic() {
        let raw = "SELECT a /* x */ FROM t -- y";
        assert_eq!(NormalizedView::from_raw(raw), NormalizedView::from_raw(raw));
    }
}
