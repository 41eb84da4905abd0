//! Credential primitives library
//!
//! Provides the stateless building blocks of the identity service:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-bounded credential issuance and verification (JWT)
//!
//! Both components are pure functions of their inputs plus a fixed
//! configuration supplied at construction time. They hold no global state
//! and perform no I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credential::HashingCost;
//! use credential::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(HashingCost::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Signed Credentials
//! ```
//! use chrono::Duration;
//! use chrono::Utc;
//! use credential::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let token = codec.issue("account-123", Utc::now()).unwrap();
//! let claims = codec.verify(&token, Utc::now()).unwrap();
//! assert_eq!(claims.sub, "account-123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
