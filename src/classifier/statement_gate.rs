use crate::scanner::lexer::{self, TokenKind};
use crate::scanner::normalize::NormalizedView;
use crate::verdict::{RejectCode, Rejection};

/// Leading verbs that introduce a read query.
pub const ALLOWED_LEADING_VERBS: &[&str] = &["select", "with"];

/// Confirm the statement opens with a read-query verb.
///
/// This is a positive allowlist, not a denylist: it is the backstop that
/// catches any statement form the keyword denylist does not know about.
pub fn ensure_read_query(view: &NormalizedView) -> Result<(), Rejection> {
    let leading = lexer::tokenize(view.text())
        .into_iter()
        .find(|token| !token.is_trivia());

    match leading {
        Some(token) if token.kind == TokenKind::Word && ALLOWED_LEADING_VERBS.contains(&token.text) => {
            Ok(())
        }
        Some(token) => Err(Rejection::new(
            RejectCode::NotAReadQuery,
            format!("statement does not begin with SELECT or WITH: {}", token.text),
        )),
        None => Err(Rejection::new(
            RejectCode::NotAReadQuery,
            "statement has no leading token",
        )),
    }
}
