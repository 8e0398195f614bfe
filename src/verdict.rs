use std::fmt;

use serde::Serialize;

/// The one message callers may show to end users for any rejection.
///
/// Reason codes and offending names are operator-facing only; surfacing them
/// would coach the next injection attempt.
pub const GENERIC_REJECTION_MESSAGE: &str =
    "The generated query could not be validated for execution. Please rephrase your request.";

/// Categorized reason a query was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectCode {
    /// Input was empty, absent, or whitespace/comments only.
    EmptyQuery,
    /// Input could not be analyzed at all.
    MalformedInput,
    /// More than one executable statement (stacked queries).
    MultiStatement,
    /// A data-definition, data-modification, privilege, or execution verb.
    ForbiddenOperation,
    /// A schema-introspection verb (EXPLAIN, DESCRIBE, SHOW).
    ForbiddenIntrospection,
    /// The statement does not begin with SELECT or WITH.
    NotAReadQuery,
    /// A reference into a system/catalog schema.
    SystemSchemaAccess,
    /// A reference to an object outside the allowlist.
    UnauthorizedTable,
}

impl RejectCode {
    /// Structural codes mean the input could not be reasoned about;
    /// everything else is a policy decision about an understood input.
    pub fn is_structural(self) -> bool {
        matches!(self, RejectCode::EmptyQuery | RejectCode::MalformedInput)
    }
}

impl fmt::Display for RejectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RejectCode::EmptyQuery => "EMPTY_QUERY",
            RejectCode::MalformedInput => "MALFORMED_INPUT",
            RejectCode::MultiStatement => "MULTI_STATEMENT",
            RejectCode::ForbiddenOperation => "FORBIDDEN_OPERATION",
            RejectCode::ForbiddenIntrospection => "FORBIDDEN_INTROSPECTION",
            RejectCode::NotAReadQuery => "NOT_A_READ_QUERY",
            RejectCode::SystemSchemaAccess => "SYSTEM_SCHEMA_ACCESS",
            RejectCode::UnauthorizedTable => "UNAUTHORIZED_TABLE",
        };
        write!(f, "{code}")
    }
}

/// A single stage's refusal: the code plus an operator-facing detail.
///
/// Stages return `Result<_, Rejection>` so refusal is an ordinary value and
/// each stage stays unit-testable in isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Categorized reason.
    pub code: RejectCode,
    /// Operator-facing detail; never forwarded verbatim to end users.
    pub detail: String,
}

impl Rejection {
    /// Build a rejection with a detail message.
    pub fn new(code: RejectCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

/// Outcome of validating one query: cleared for execution or refused.
///
/// All-or-nothing: there is no partial admission of safe fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The query passed every stage; `sql` is byte-identical to the input.
    Admitted {
        /// The original query text, unchanged.
        sql: String,
    },
    /// The query was refused.
    Rejected {
        /// Categorized reason.
        code: RejectCode,
        /// Operator-facing detail; never forwarded verbatim to end users.
        detail: String,
    },
}

impl Verdict {
    /// True when the query was cleared for execution.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Verdict::Admitted { .. })
    }

    /// The rejection code, when rejected.
    pub fn code(&self) -> Option<RejectCode> {
        match self {
            Verdict::Admitted { .. } => None,
            Verdict::Rejected { code, .. } => Some(*code),
        }
    }

    /// The message callers may surface to an end user.
    ///
    /// Only rejections have one; an admitted query needs no explanation.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Verdict::Admitted { .. } => None,
            Verdict::Rejected { .. } => Some(GENERIC_REJECTION_MESSAGE),
        }
    }
}

impl From<Rejection> for Verdict {
    fn from(rejection: Rejection) -> Self {
        Verdict::Rejected {
            code: rejection.code,
            detail: rejection.detail,
        }
    }
}
