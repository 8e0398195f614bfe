use sqlgate::authority::policy::{PolicyError, QueryPolicy, DEFAULT_DENIED_SCHEMAS};
use sqlgate::validator;
use sqlgate::verdict::RejectCode;

#[test]
fn policy_json_round_trips_into_validation() {
    let policy = QueryPolicy::from_json(
        r#"{
            "allowed_objects": ["analytics.trips", "zones"],
            "canonical_object": "analytics.trips"
        }"#,
    )
    .expect("policy should parse");

    let verdict = validator::validate("SELECT * FROM analytics.trips", &policy);
    assert!(verdict.is_admitted());

    let verdict = validator::validate("SELECT * FROM intruders", &policy);
    assert_eq!(verdict.code(), Some(RejectCode::UnauthorizedTable));
}

#[test]
fn canonical_object_is_implicitly_allowed() {
    let policy = QueryPolicy::from_json(r#"{ "canonical_object": "trips" }"#)
        .expect("policy should parse");
    assert!(policy.is_allowed("trips"));
    assert_eq!(policy.canonical_object(), Some("trips"));
}

#[test]
fn custom_denied_schemas_replace_the_default_set() {
    let policy = QueryPolicy::from_json(
        r#"{ "allowed_objects": ["t"], "denied_schemas": ["forbidden_zone"] }"#,
    )
    .expect("policy should parse");

    let verdict = validator::validate("SELECT * FROM forbidden_zone.t", &policy);
    assert_eq!(verdict.code(), Some(RejectCode::SystemSchemaAccess));
}

#[test]
fn default_denied_set_covers_the_usual_catalogs() {
    for schema in ["information_schema", "pg_catalog", "mysql", "sys", "sqlite_master"] {
        assert!(
            DEFAULT_DENIED_SCHEMAS.contains(&schema),
            "missing default denied schema: {schema}"
        );
    }
}

#[test]
fn empty_policy_admits_only_tableless_queries() {
    let policy = QueryPolicy::new(std::iter::empty::<&str>());
    assert!(validator::validate("SELECT 1", &policy).is_admitted());
    assert_eq!(
        validator::validate("SELECT * FROM anything", &policy).code(),
        Some(RejectCode::UnauthorizedTable)
    );
}

#[test]
fn malformed_policy_json_is_an_error_not_a_panic() {
    let err = QueryPolicy::from_json("{ not json").expect_err("should fail");
    assert!(matches!(err, PolicyError::Parse(_)));
    assert!(err.to_string().contains("invalid policy JSON"));
}

#[test]
fn shared_policy_is_consistent_across_threads() {
    use std::sync::Arc;

    let policy = Arc::new(QueryPolicy::new(["trips"]));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let policy = Arc::clone(&policy);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    assert!(validator::validate("SELECT * FROM trips", &policy).is_admitted());
                    assert!(!validator::validate("SELECT * FROM other", &policy).is_admitted());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("validation thread should not panic");
    }
}
