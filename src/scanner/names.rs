/// Return the identifier without surrounding double quotes.
pub fn unquote_identifier(ident: &str) -> &str {
    ident
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(ident)
}

/// Normalize an identifier for case-insensitive matching.
///
/// Trims whitespace, removes surrounding double quotes on a single
/// identifier, and lowercases the result.
pub fn normalize_identifier(ident: &str) -> String {
    unquote_identifier(ident.trim()).to_lowercase()
}

/// Normalize a possibly schema-qualified object name part by part.
///
/// `"Analytics"."Trips"` and `ANALYTICS.TRIPS` both become
/// `analytics.trips`.
pub fn normalize_object_name(name: &str) -> String {
    split_qualified(name)
        .into_iter()
        .map(|part| normalize_identifier(&part))
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a potentially schema-qualified name into its dot-separated parts.
///
/// Handles dots inside quoted identifiers, e.g. `"my.schema"."table.name"`.
pub fn split_qualified(name: &str) -> Vec<String> {
    let mut in_quotes = false;
    let mut start = 0usize;
    let mut parts = Vec::new();

    for (idx, ch) in name.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                parts.push(name[start..idx].trim().to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(name[start..].trim().to_string());
    parts
}

/// Terminal relation identifier of a possibly qualified name, normalized.
///
/// Examples:
/// - `"analytics.trips"` -> `"trips"`
/// - `"\"Auth\".\"Users\""` -> `"users"`
/// - `"TRIPS"` -> `"trips"`
pub fn terminal_relation(name: &str) -> String {
    split_qualified(name)
        .last()
        .map(|part| normalize_identifier(part))
        .unwrap_or_default()
}

/// Build lookup candidates for schema-aware allowlist matching.
///
/// Ordered from most specific (full qualified name) to least specific
/// (terminal relation alone), normalized and deduplicated.
pub fn lookup_candidates(name: &str) -> Vec<String> {
    let full = normalize_object_name(name);
    let terminal = terminal_relation(name);

    let mut candidates = vec![full];
    if !candidates.contains(&terminal) {
        candidates.push(terminal);
    }
    candidates
}
