use std::collections::HashSet;

use crate::scanner::lexer::{self, skip_balanced, Token, TokenKind};
use crate::scanner::names::normalize_identifier;
use crate::scanner::normalize::NormalizedView;

/// Collect the names defined by a leading WITH clause.
///
/// Walks the top-level comma-separated `name [(columns)] AS (...)` list,
/// tracking parenthesis depth so a closing parenthesis inside a nested
/// subquery does not end the outer definition early. These names are local,
/// synthetic relations; without this set every CTE-based query would be
/// refused for referencing an "unauthorized table".
///
/// On a malformed clause the walk stops and returns what it has so far.
/// That errs in the safe direction: an uncollected name is later treated as
/// a real table reference and fails the allowlist check.
pub fn collect_cte_names(view: &NormalizedView) -> HashSet<String> {
    let tokens: Vec<Token<'_>> = lexer::tokenize(view.text())
        .into_iter()
        .filter(|token| !token.is_trivia())
        .collect();
    let mut names = HashSet::new();

    let mut pos = 0usize;
    if !matches!(tokens.first(), Some(t) if t.kind == TokenKind::Word && t.text == "with") {
        return names;
    }
    pos += 1;

    if matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Word && t.text == "recursive") {
        pos += 1;
    }

    loop {
        // CTE name.
        let Some(name_token) = tokens.get(pos) else {
            break;
        };
        if !matches!(
            name_token.kind,
            TokenKind::Word | TokenKind::QuotedIdentifier
        ) {
            break;
        }
        let name = normalize_identifier(name_token.text);
        pos += 1;

        // Optional column list before AS.
        if is_punct(tokens.get(pos), "(") {
            pos = match skip_balanced(&tokens, pos) {
                Some(next) => next,
                None => break,
            };
        }

        if !matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Word && t.text == "as") {
            break;
        }
        pos += 1;

        // Postgres allows AS [NOT] MATERIALIZED before the body.
        while matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Word
            && (t.text == "not" || t.text == "materialized"))
        {
            pos += 1;
        }

        if !is_punct(tokens.get(pos), "(") {
            break;
        }
        pos = match skip_balanced(&tokens, pos) {
            Some(next) => next,
            None => break,
        };

        names.insert(name);

        if is_punct(tokens.get(pos), ",") {
            pos += 1;
            continue;
        }
        break;
    }

    names
}

fn is_punct(token: Option<&Token<'_>>, text: &str) -> bool {
    matches!(token, Some(t) if t.kind == TokenKind::Punct && t.text == text)
}
