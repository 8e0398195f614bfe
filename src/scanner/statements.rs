use crate::scanner::lexer::{self, TokenKind};
use crate::scanner::normalize::NormalizedView;
use crate::verdict::{RejectCode, Rejection};

/// Confirm the view holds exactly one executable statement.
///
/// A single trailing separator, optionally followed by whitespace, is
/// tolerated. A separator followed by anything else is a stacked query.
/// Separators inside string literals or quoted identifiers never count:
/// the tokenizer has already folded them into their literal token.
pub fn ensure_single_statement(view: &NormalizedView) -> Result<(), Rejection> {
    let tokens = lexer::tokenize(view.text());
    let mut separator_seen = false;

    for token in &tokens {
        if separator_seen && !token.is_trivia() {
            return Err(Rejection::new(
                RejectCode::MultiStatement,
                "statement separator followed by further content",
            ));
        }
        if token.kind == TokenKind::Punct && token.text == ";" {
            separator_seen = true;
        }
    }

    Ok(())
}
