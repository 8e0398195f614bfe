#![allow(dead_code)]

use sqlgate::authority::policy::QueryPolicy;
use sqlgate::validator;
use sqlgate::verdict::{RejectCode, Verdict};

pub(crate) fn policy(allowed: &[&str]) -> QueryPolicy {
    QueryPolicy::new(allowed.iter().copied())
}

pub(crate) fn validate(sql: &str, allowed: &[&str]) -> Verdict {
    validator::validate(sql, &policy(allowed))
}

pub(crate) fn assert_admitted(sql: &str, allowed: &[&str]) {
    let verdict = validate(sql, allowed);
    assert!(
        verdict.is_admitted(),
        "expected admission for {sql:?}, got {verdict:?}"
    );
}

pub(crate) fn assert_rejected(sql: &str, allowed: &[&str], code: RejectCode) {
    let verdict = validate(sql, allowed);
    assert_eq!(
        verdict.code(),
        Some(code),
        "expected {code} for {sql:?}, got {verdict:?}"
    );
}
