use thiserror::Error;

use credential::PasswordError;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password strength policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter, one lowercase letter, and one digit")]
    MissingCharacterClass,
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersonNameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all authentication and account operations.
///
/// A closed set of failure kinds: the HTTP boundary maps each variant to a
/// status exactly once and never inspects error text.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] PersonNameError),

    // Domain-level errors
    #[error("An account with email {0} already exists")]
    DuplicateAccount(String),

    /// Login failure. Does not distinguish an unknown email from a wrong
    /// password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credential rejected at verification. Forgery and expiry collapse
    /// into this one variant; the distinction lives only in the log.
    #[error("Invalid or expired credential")]
    Unauthenticated,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Credential signing error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
