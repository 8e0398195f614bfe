use std::collections::HashSet;

use crate::authority::policy::QueryPolicy;
use crate::verdict::{RejectCode, Rejection};

/// Check every extracted reference against the policy.
///
/// References naming a CTE are skipped: they are local, synthetic relations.
/// For the rest, the denied-schema check runs first and wins over the
/// allowlist, so a catalog name mistakenly allowlisted is still refused.
pub fn check_references(
    references: &[String],
    cte_names: &HashSet<String>,
    policy: &QueryPolicy,
) -> Result<(), Rejection> {
    for reference in references {
        if cte_names.contains(reference) {
            continue;
        }

        for fragment in policy.denied_schemas() {
            if contains_word_fragment(reference, fragment) {
                return Err(Rejection::new(
                    RejectCode::SystemSchemaAccess,
                    format!("reference '{reference}' hits denied schema fragment '{fragment}'"),
                ));
            }
        }

        if !policy.is_allowed(reference) {
            return Err(Rejection::new(
                RejectCode::UnauthorizedTable,
                format!("object '{reference}' is not in the allowlist"),
            ));
        }
    }

    Ok(())
}

/// True when `fragment` occurs in `haystack` flanked by non-alphanumeric
/// characters or string edges. Underscores and dots count as boundaries, so
/// `information_schema` matches inside `information_schema_tables` and
/// `pg_catalog.pg_tables`, but `sys` does not match inside `system`.
pub fn contains_word_fragment(haystack: &str, fragment: &str) -> bool {
    if fragment.is_empty() {
        return false;
    }
    let mut search_from = 0usize;
    while let Some(found) = haystack[search_from..].find(fragment) {
        let start = search_from + found;
        let end = start + fragment.len();

        let left_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let right_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if left_ok && right_ok {
            return true;
        }

        search_from = start + 1;
    }
    false
}
