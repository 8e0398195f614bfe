/// The access check: denied-schema precedence, then the allowlist.
pub mod access;
/// Permitted-object configuration and the built-in denied-schema set.
pub mod policy;
