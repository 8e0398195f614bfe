use crate::scanner::lexer::{self, TokenKind};
use crate::scanner::normalize::NormalizedView;
use crate::verdict::{RejectCode, Rejection};

/// Verbs that mutate schema or data, change privileges, or execute code.
///
/// `REPLACE` is deliberately absent: it is a common string function in
/// analytical SQL, and `CREATE OR REPLACE` is caught by `create`. `SET` is
/// likewise absent (it cannot change state inside a single read statement
/// and collides with nothing the gate needs).
pub const FORBIDDEN_OPERATIONS: &[&str] = &[
    // schema-mutating
    "create", "alter", "drop", "truncate",
    // data-mutating
    "insert", "update", "delete", "merge",
    // privilege
    "grant", "revoke",
    // execution
    "exec", "execute", "call",
    // environment / engine state
    "attach", "detach", "pragma", "vacuum", "copy",
];

/// Verbs that reveal database structure rather than data.
pub const INTROSPECTION_VERBS: &[&str] = &["explain", "describe", "desc", "show"];

/// Scan every word token for disallowed verbs.
///
/// Matching is word-boundary based by construction: the tokenizer only
/// yields whole words, so `DESC` inside `describe_me` or `;DROP` fused into
/// a literal can never match or be missed. The token sequence
/// `ORDER BY ... DESC/ASC` is exempt from the introspection check, since
/// there `DESC` is a sort direction, not a verb.
pub fn check_keywords(view: &NormalizedView) -> Result<(), Rejection> {
    let mut previous_word: Option<&str> = None;
    let mut in_order_by = false;

    for token in lexer::tokenize(view.text()) {
        if token.kind != TokenKind::Word {
            continue;
        }
        let word = token.text;

        if previous_word == Some("order") && word == "by" {
            in_order_by = true;
        }

        if FORBIDDEN_OPERATIONS.contains(&word) {
            return Err(Rejection::new(
                RejectCode::ForbiddenOperation,
                format!("forbidden operation keyword: {word}"),
            ));
        }

        let sort_direction = in_order_by && (word == "desc" || word == "asc");
        if !sort_direction && INTROSPECTION_VERBS.contains(&word) {
            return Err(Rejection::new(
                RejectCode::ForbiddenIntrospection,
                format!("schema introspection keyword: {word}"),
            ));
        }

        previous_word = Some(word);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(sql: &str) -> Result<(), Rejection> {
        check_keywords(&NormalizedView::from_raw(sql))
    }

    #[test]
    fn clean_read_query_passes() {
        assert!(check("SELECT a, COUNT(*) FROM t GROUP BY a").is_ok());
    }

    #[test]
    fn every_forbidden_verb_is_caught_embedded_or_leading() {
        for verb in FORBIDDEN_OPERATIONS {
            let leading = format!("{verb} something");
            let err = check(&leading).expect_err("leading verb should be caught");
            assert_eq!(err.code, RejectCode::ForbiddenOperation, "verb: {verb}");

            let embedded = format!("select 1 where {verb} x");
            let err = check(&embedded).expect_err("embedded verb should be caught");
            assert_eq!(err.code, RejectCode::ForbiddenOperation, "verb: {verb}");
        }
    }

    #[test]
    fn introspection_verbs_are_caught() {
        for verb in ["EXPLAIN SELECT 1", "DESCRIBE t", "SHOW TABLES", "DESC t"] {
            let err = check(verb).expect_err("introspection should be caught");
            assert_eq!(err.code, RejectCode::ForbiddenIntrospection);
        }
    }

    #[test]
    fn desc_as_sort_direction_is_exempt() {
        assert!(check("SELECT a FROM t ORDER BY a DESC").is_ok());
        assert!(check("SELECT a FROM t ORDER BY a ASC, b DESC").is_ok());
        assert!(check("SELECT a FROM t ORDER BY cost DESC LIMIT 10").is_ok());
    }

    #[test]
    fn desc_without_order_by_is_still_caught() {
        let err = check("SELECT a FROM t DESC").expect_err("bare DESC");
        assert_eq!(err.code, RejectCode::ForbiddenIntrospection);
    }

    #[test]
    fn substrings_of_keywords_do_not_match() {
        // update -> updated_at, delete -> deleted, drop -> dropoff, desc -> description
        assert!(check("SELECT updated_at, deleted, dropoff_zone FROM t").is_ok());
        assert!(check("SELECT description FROM t").is_ok());
        assert!(check("SELECT showtime, called, executor FROM t").is_ok());
    }

    #[test]
    fn keywords_inside_string_literals_do_not_match() {
        assert!(check("SELECT * FROM t WHERE note = 'please drop me a line'").is_ok());
    }

    #[test]
    fn keyword_mentioned_inside_a_comment_is_harmless() {
        // The engine ignores comment content, so the gate does too.
        assert!(check("SELECT 1 /* drop */ FROM t").is_ok());
    }

    #[test]
    fn line_comment_cannot_shield_a_following_keyword() {
        let err = check("SELECT 1 -- benign\nDROP TABLE x").expect_err("DROP is outside the comment");
        assert_eq!(err.code, RejectCode::ForbiddenOperation);
    }
}
