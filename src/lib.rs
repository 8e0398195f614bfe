//! Admission gate for machine-generated SQL.
//!
//! Takes a single SQL string produced by an untrusted generator, checks it
//! against a policy of permitted data objects, and returns either the query
//! unchanged (cleared for execution) or a categorized rejection. Analysis is
//! purely lexical: no SQL parser or planner is involved.
#![warn(missing_docs)]

/// Audit records emitted alongside every verdict.
pub mod audit;
/// Object allowlist, denied-schema set, and the access check.
pub mod authority;
/// Disallowed-keyword detection and the leading-verb gate.
pub mod classifier;
/// CTE name and table/object reference extraction.
pub mod extractor;
/// Comment stripping, tokenization, identifier normalization, and statement splitting.
pub mod scanner;
/// The sequential validation pipeline.
pub mod validator;
/// Verdicts, rejection codes, and the generic user-facing message.
pub mod verdict;
