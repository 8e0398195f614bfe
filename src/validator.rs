use std::panic::{self, AssertUnwindSafe};

use crate::audit::AuditRecord;
use crate::authority::access;
use crate::authority::policy::QueryPolicy;
use crate::classifier::{keywords, statement_gate};
use crate::extractor::{cte, tables};
use crate::scanner::normalize::NormalizedView;
use crate::scanner::statements;
use crate::verdict::{RejectCode, Rejection, Verdict};

/// Verdict plus the audit record for one validation call.
#[derive(Debug, Clone)]
pub struct Validation {
    /// The decision.
    pub verdict: Verdict,
    /// The structured log event to hand to the audit sink.
    pub audit: AuditRecord,
}

/// Validate one query and produce both the verdict and its audit record.
pub fn run(query: &str, policy: &QueryPolicy) -> Validation {
    let verdict = validate(query, policy);
    let audit = AuditRecord::new(query, &verdict);
    Validation { verdict, audit }
}

/// Decide whether `query` is safe to execute under `policy`.
///
/// Pure and deterministic: the same query against the same policy always
/// yields the same verdict. Stages run in a fixed order and the first
/// refusal wins; nothing after it executes. A panic anywhere in the
/// pipeline is contained here and becomes a `MALFORMED_INPUT` rejection,
/// honoring the contract that every input maps to a verdict.
pub fn validate(query: &str, policy: &QueryPolicy) -> Verdict {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_pipeline(query, policy)));
    match outcome {
        Ok(Ok(())) => Verdict::Admitted {
            sql: query.to_string(),
        },
        Ok(Err(rejection)) => rejection.into(),
        Err(_) => Rejection::new(RejectCode::MalformedInput, "query could not be analyzed").into(),
    }
}

/// Validate an optional query; `None` is an empty query.
pub fn validate_opt(query: Option<&str>, policy: &QueryPolicy) -> Verdict {
    match query {
        Some(query) => validate(query, policy),
        None => Rejection::new(RejectCode::EmptyQuery, "no query was provided").into(),
    }
}

fn run_pipeline(query: &str, policy: &QueryPolicy) -> Result<(), Rejection> {
    if query.trim().is_empty() {
        return Err(Rejection::new(RejectCode::EmptyQuery, "query is empty"));
    }

    let view = NormalizedView::from_raw(query);
    if view.is_effectively_empty() {
        return Err(Rejection::new(
            RejectCode::EmptyQuery,
            "query holds only comments or whitespace",
        ));
    }

    statements::ensure_single_statement(&view)?;
    keywords::check_keywords(&view)?;
    statement_gate::ensure_read_query(&view)?;

    let cte_names = cte::collect_cte_names(&view);
    let references = tables::collect_table_references(&view);
    access::check_references(&references, &cte_names, policy)?;

    Ok(())
}
