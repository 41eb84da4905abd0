use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountView;
use crate::account::models::AuthenticatedSession;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;

/// Port for the credential lifecycle operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, password, and
    ///   optional names
    ///
    /// # Returns
    /// Public view of the created account
    ///
    /// # Errors
    /// * `DuplicateAccount` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AccountView, AuthError>;

    /// Authenticate an email/password pair and issue a credential.
    ///
    /// # Arguments
    /// * `email` - Raw email string as presented by the caller
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Public account view plus the signed credential
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    ///   (one failure kind for both)
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, email: &str, password: &str)
        -> Result<AuthenticatedSession, AuthError>;

    /// Verify a presented credential and resolve its subject.
    ///
    /// Does not consult the store: a deleted account stays valid until its
    /// credential expires, a staleness window bounded by the configured
    /// lifetime.
    ///
    /// # Errors
    /// * `Unauthenticated` - Credential is forged, malformed, or expired
    fn verify_token(&self, token: &str) -> Result<AccountId, AuthError>;

    /// Retrieve the public view of an account.
    ///
    /// # Errors
    /// * `AccountNotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn account(&self, id: &AccountId) -> Result<AccountView, AuthError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// The store enforces email uniqueness atomically: of two racing
    /// inserts for the same email exactly one succeeds and the other is
    /// reported as `DuplicateAccount`.
    ///
    /// # Errors
    /// * `DuplicateAccount` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AuthError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AuthError>;

    /// Retrieve an account by its normalized email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError>;
}
