use thiserror::Error;

/// Error type for credential issue and verify operations.
///
/// `Expired` and `Invalid` are distinct so the server log can tell a stale
/// credential from a forged one; callers are expected to collapse both into
/// a single externally visible rejection.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign credential: {0}")]
    SigningFailed(String),

    #[error("Credential is expired")]
    Expired,

    #[error("Credential is invalid: {0}")]
    Invalid(String),
}
