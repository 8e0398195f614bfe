/// Forbidden-verb and introspection-verb detection over word tokens.
pub mod keywords;
/// Positive gate on the statement's leading verb.
pub mod statement_gate;
