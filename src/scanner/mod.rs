/// Token classes and the quote-aware tokenizer all later stages build on.
pub mod lexer;
/// Identifier unquoting, case folding, and schema-qualified name splitting.
pub mod names;
/// Comment-stripped, case-folded view of the raw query used for matching.
pub mod normalize;
/// Single-statement enforcement with trailing-terminator tolerance.
pub mod statements;
