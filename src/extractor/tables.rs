use crate::scanner::lexer::{self, skip_balanced, Token, TokenKind};
use crate::scanner::names::normalize_identifier;
use crate::scanner::normalize::NormalizedView;

/// Words that end a FROM-list capture; anything else after a name is read
/// as an alias.
const CLAUSE_KEYWORDS: &[&str] = &[
    "where", "group", "order", "having", "limit", "offset", "fetch", "for", "window", "qualify",
    "union", "intersect", "except", "join", "inner", "left", "right", "full", "cross", "outer",
    "natural", "on", "using",
];

/// Leading words that mark a parenthesized FROM item as a subquery rather
/// than a grouped table reference.
const SUBQUERY_HEADS: &[&str] = &["select", "with", "values"];

/// Function heads whose argument list uses FROM as a separator, not as a
/// table introducer: `EXTRACT(month FROM ts)`, `SUBSTRING(x FROM 1 FOR 3)`,
/// `TRIM(LEADING ' ' FROM x)`, `OVERLAY(x PLACING y FROM 2)`.
const FROM_ARGUMENT_FUNCTIONS: &[&str] = &["extract", "substring", "trim", "position", "overlay"];

/// Collect every object name referenced after a FROM or JOIN keyword,
/// subqueries included, duplicates permitted.
///
/// This is a shallow lexical scan, deliberately a superset extractor: an
/// occasional spurious candidate (later refused by the allowlist) is
/// acceptable, a missed genuine reference is not. Parenthesized subqueries
/// are skipped at the FROM position itself; their inner FROM/JOIN keywords
/// are picked up by the same linear pass. A FROM directly inside the
/// argument list of a FROM-separator function is not a capture site; a
/// subquery nested inside such an argument opens its own parenthesis level
/// and is scanned as usual.
pub fn collect_table_references(view: &NormalizedView) -> Vec<String> {
    let tokens: Vec<Token<'_>> = lexer::tokenize(view.text())
        .into_iter()
        .filter(|token| !token.is_trivia())
        .collect();
    let mut references = Vec::new();
    // One entry per open parenthesis: whether it is the argument list of a
    // FROM-separator function.
    let mut argument_levels: Vec<bool> = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        match (token.kind, token.text) {
            (TokenKind::Punct, "(") => {
                let head = idx > 0
                    && tokens[idx - 1].kind == TokenKind::Word
                    && FROM_ARGUMENT_FUNCTIONS.contains(&tokens[idx - 1].text);
                argument_levels.push(head);
            }
            (TokenKind::Punct, ")") => {
                argument_levels.pop();
            }
            (TokenKind::Word, "from") if argument_levels.last() == Some(&true) => {}
            (TokenKind::Word, "from" | "join") => {
                capture_from_list(&tokens, idx + 1, &mut references);
            }
            _ => {}
        }
    }

    references
}

/// Capture the comma-separated names starting at `pos`, pushing each onto
/// `references`.
///
/// A parenthesized item is either a subquery, skipped whole, or a grouped
/// table reference (`FROM (tbl)`, `FROM (a JOIN b ON ...)`), which is
/// descended into. Descents keep a resume stack instead of recursing, so
/// pathological nesting depth cannot exhaust the call stack.
fn capture_from_list(tokens: &[Token<'_>], mut pos: usize, references: &mut Vec<String>) {
    // Positions just past groups whose tails (alias, comma) are still
    // pending once the items inside them have been read.
    let mut resume: Vec<usize> = Vec::new();

    'items: loop {
        // LATERAL prefixes a derived table or function, never names one.
        if matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Word && t.text == "lateral") {
            pos += 1;
        }

        loop {
            match tokens.get(pos) {
                Some(t) if t.kind == TokenKind::Punct && t.text == "(" => {
                    if is_subquery_head(tokens.get(pos + 1)) {
                        // Subquery: skip its body here so a comma after it
                        // still continues the list; its own FROM is captured
                        // by the outer linear pass.
                        match skip_balanced(tokens, pos) {
                            Some(next) => {
                                pos = next;
                                break;
                            }
                            None => return,
                        }
                    }
                    // Grouped table reference: descend, remembering where
                    // the list resumes after the group. An unbalanced group
                    // is read through as if the parenthesis were not there.
                    if let Some(after) = skip_balanced(tokens, pos) {
                        resume.push(after);
                    }
                    pos += 1;
                }
                Some(t) if matches!(t.kind, TokenKind::Word | TokenKind::QuotedIdentifier) => {
                    let (name, after_name) = read_qualified_name(tokens, pos);
                    references.push(name);
                    pos = after_name;
                    break;
                }
                _ => return,
            }
        }

        pos = skip_alias(tokens, pos);

        // A comma continues the list; anything else ends the current item,
        // ascending out of pending groups so a comma after a group still
        // continues the outer list.
        loop {
            if matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Punct && t.text == ",") {
                pos += 1;
                continue 'items;
            }
            match resume.pop() {
                Some(after) => pos = skip_alias(tokens, after),
                None => return,
            }
        }
    }
}

fn is_subquery_head(token: Option<&Token<'_>>) -> bool {
    matches!(token, Some(t) if t.kind == TokenKind::Word && SUBQUERY_HEADS.contains(&t.text))
}

/// Read `part(.part)*` starting at a word or quoted identifier; returns the
/// normalized dotted name and the position past it.
fn read_qualified_name(tokens: &[Token<'_>], start: usize) -> (String, usize) {
    let mut parts = vec![normalize_identifier(tokens[start].text)];
    let mut pos = start + 1;

    while matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Punct && t.text == ".") {
        match tokens.get(pos + 1) {
            Some(t) if matches!(t.kind, TokenKind::Word | TokenKind::QuotedIdentifier) => {
                parts.push(normalize_identifier(t.text));
                pos += 2;
            }
            _ => break,
        }
    }

    (parts.join("."), pos)
}

/// Skip an optional `[AS] alias [(columns)]` after a captured name.
fn skip_alias(tokens: &[Token<'_>], mut pos: usize) -> usize {
    let explicit_as =
        matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Word && t.text == "as");
    if explicit_as {
        pos += 1;
    }

    match tokens.get(pos) {
        Some(t)
            if t.kind == TokenKind::QuotedIdentifier
                || (t.kind == TokenKind::Word
                    && (explicit_as || !CLAUSE_KEYWORDS.contains(&t.text))) =>
        {
            pos += 1;
        }
        _ => return pos,
    }

    // Alias column list: `t AS x(a, b)`.
    if matches!(tokens.get(pos), Some(t) if t.kind == TokenKind::Punct && t.text == "(") {
        return skip_balanced(tokens, pos).unwrap_or(tokens.len());
    }

    pos
}
