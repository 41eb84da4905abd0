use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed, time-bounded credentials.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret and the credential
/// lifetime are injected at construction and never read from the
/// environment.
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in environment variables or secure vaults, never in code
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a new codec with a secret key and credential lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing credentials
    /// * `ttl` - How long an issued credential stays valid
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a signed credential for `subject`, valid from `now` for the
    /// configured lifetime.
    ///
    /// Pure function of `(subject, now)` and the codec configuration.
    ///
    /// # Errors
    /// * `SigningFailed` - Serialization or signing failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(subject, now, now + self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a presented credential against the supplied clock.
    ///
    /// Signature integrity is checked before any claim is looked at, so a
    /// forged credential is rejected regardless of its contents. Expiry is
    /// evaluated against `now`, not the process clock.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch or malformed credential
    /// * `Expired` - `now` has reached the expiration time
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
