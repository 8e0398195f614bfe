use std::collections::HashSet;

use serde::Deserialize;

use crate::scanner::names::normalize_object_name;

/// Catalog/system schema fragments that are denied regardless of allowlist
/// contents. Covers the engines an analytical gate typically fronts:
/// Postgres/Redshift, MySQL, SQLite, DuckDB.
pub const DEFAULT_DENIED_SCHEMAS: &[&str] = &[
    "information_schema",
    "pg_catalog",
    "pg_internal",
    "pg_temp",
    "pg_toast",
    "performance_schema",
    "mysql",
    "sys",
    "sqlite_master",
    "sqlite_temp_master",
    "duckdb_catalog",
    "svv",
    "stv",
    "stl",
];

/// Failure to load a policy from its configuration form.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The JSON could not be parsed into a policy.
    #[error("invalid policy JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The policy file could not be read.
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk policy form.
#[derive(Debug, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    allowed_objects: Vec<String>,
    #[serde(default)]
    canonical_object: Option<String>,
    #[serde(default = "default_denied_schemas")]
    denied_schemas: Vec<String>,
}

fn default_denied_schemas() -> Vec<String> {
    DEFAULT_DENIED_SCHEMAS
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// The read-only configuration one validation consults: which objects a
/// query may reference and which schema fragments it never may.
///
/// Logically immutable after construction; share freely across concurrent
/// validations (behind an `Arc` if hot-swapped).
#[derive(Debug, Clone)]
pub struct QueryPolicy {
    allowed: HashSet<String>,
    canonical_object: Option<String>,
    denied_schemas: Vec<String>,
}

impl QueryPolicy {
    /// Build a policy from permitted object names, with the built-in
    /// denied-schema set.
    pub fn new<I, S>(allowed_objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed_objects
                .into_iter()
                .map(|name| normalize_object_name(name.as_ref()))
                .collect(),
            canonical_object: None,
            denied_schemas: default_denied_schemas(),
        }
    }

    /// Extend the permitted set with further object names.
    ///
    /// Consumes and returns the policy: extension happens at configuration
    /// time, never during validation.
    pub fn with_allowed<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in extra {
            self.allowed.insert(normalize_object_name(name.as_ref()));
        }
        self
    }

    /// Load a policy from its JSON form:
    /// `{ "allowed_objects": [...], "canonical_object": ..., "denied_schemas": [...] }`.
    /// `denied_schemas` defaults to the built-in set when omitted.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let file: PolicyFile = serde_json::from_str(json)?;
        let mut allowed: HashSet<String> = file
            .allowed_objects
            .iter()
            .map(|name| normalize_object_name(name))
            .collect();
        if let Some(canonical) = &file.canonical_object {
            allowed.insert(normalize_object_name(canonical));
        }
        Ok(Self {
            allowed,
            canonical_object: file.canonical_object.map(|c| normalize_object_name(&c)),
            denied_schemas: file
                .denied_schemas
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
        })
    }

    /// Load a policy from a JSON file on disk.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, PolicyError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Number of distinct permitted objects.
    pub fn allowed_len(&self) -> usize {
        self.allowed.len()
    }

    /// The canonical data object, when the configuration names one.
    pub fn canonical_object(&self) -> Option<&str> {
        self.canonical_object.as_deref()
    }

    /// Denied schema fragments, lowercased.
    pub fn denied_schemas(&self) -> &[String] {
        &self.denied_schemas
    }

    /// True when any lookup candidate of `name` is a permitted object.
    pub fn is_allowed(&self, name: &str) -> bool {
        crate::scanner::names::lookup_candidates(name)
            .iter()
            .any(|candidate| self.allowed.contains(candidate))
    }
}
