use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use credential::PasswordHasher;
use credential::TokenCodec;

use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountView;
use crate::account::models::AuthenticatedSession;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;

/// Domain service implementation for the credential lifecycle.
///
/// Owns the orchestration of registration, login, and credential
/// verification, and is the only component that writes to the account
/// store. Hasher and codec are held by value with their configuration
/// fixed at construction; the service itself has no mutable state.
pub struct AuthService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl<AR> AuthService<AR>
where
    AR: AccountRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - Configured password hasher
    /// * `token_codec` - Configured credential codec
    pub fn new(
        repository: Arc<AR>,
        password_hasher: PasswordHasher,
        token_codec: TokenCodec,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_codec,
        }
    }
}

#[async_trait]
impl<AR> AuthServicePort for AuthService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AccountView, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateAccount(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            created_at: now,
            updated_at: now,
        };

        // The lookup above still races against concurrent registrations;
        // the store's uniqueness constraint decides the winner.
        let created = self.repository.create(account).await?;

        Ok(AccountView::from(&created))
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        // Empty credentials are rejected without touching the store.
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        // An unparseable email cannot belong to any account; report it the
        // same way as an unknown one.
        let email = EmailAddress::new(email.to_string())
            .map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify(password, &account.password_hash)?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .token_codec
            .issue(&account.id.to_string(), Utc::now())
            .map_err(|e| AuthError::Token(e.to_string()))?;

        Ok(AuthenticatedSession {
            account: AccountView::from(&account),
            token,
        })
    }

    fn verify_token(&self, token: &str) -> Result<AccountId, AuthError> {
        // The account is not re-checked against the store: a deleted
        // account stays valid until its credential expires.
        let claims = self.token_codec.verify(token, Utc::now()).map_err(|e| {
            tracing::warn!(reason = %e, "Credential rejected");
            AuthError::Unauthenticated
        })?;

        AccountId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(reason = %e, "Credential subject is not a valid account ID");
            AuthError::Unauthenticated
        })
    }

    async fn account(&self, id: &AccountId) -> Result<AccountView, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|ref account| AccountView::from(account))
            .ok_or(AuthError::AccountNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use credential::HashingCost;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::models::Password;
    use crate::account::models::PersonName;

    // Define mocks in the test module using mockall
    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AuthError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AuthError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError>;
        }
    }

    const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn test_service(repository: MockTestAccountRepository) -> AuthService<MockTestAccountRepository> {
        let password_hasher = PasswordHasher::new(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let token_codec = TokenCodec::new(TEST_SECRET, Duration::hours(24));
        AuthService::new(Arc::new(repository), password_hasher, token_codec)
    }

    fn stored_account(email: &str, password: &str) -> Account {
        let hasher = PasswordHasher::new(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: hasher.hash(password).unwrap(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn register_command(email: &str) -> RegisterCommand {
        RegisterCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new("Passw0rd!".to_string()).unwrap(),
            Some(PersonName::new("Alice".to_string()).unwrap()),
            None,
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "alice@example.com"
                    && account.password_hash.starts_with("$argon2")
                    && account.created_at == account.updated_at
            })
            .times(1)
            .returning(|account| Ok(account));

        let service = test_service(repository);

        let result = service.register(register_command("Alice@Example.com")).await;
        assert!(result.is_ok());

        let view = result.unwrap();
        // Normalized before storage and exposure
        assert_eq!(view.email, "alice@example.com");
        assert_eq!(view.first_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_account("alice@example.com", "Passw0rd!"))));

        repository.expect_create().times(0);

        let service = test_service(repository);

        let result = service.register(register_command("alice@example.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::DuplicateAccount(_)
        ));
    }

    #[tokio::test]
    async fn test_register_race_lost_at_insert() {
        let mut repository = MockTestAccountRepository::new();

        // The pre-insert lookup saw nothing, but a concurrent registration
        // won the insert; the store reports the conflict.
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository.expect_create().times(1).returning(|account| {
            Err(AuthError::DuplicateAccount(
                account.email.as_str().to_string(),
            ))
        });

        let service = test_service(repository);

        let result = service.register(register_command("alice@example.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::DuplicateAccount(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success_and_token_round_trip() {
        let mut repository = MockTestAccountRepository::new();

        let account = stored_account("alice@example.com", "Passw0rd!");
        let account_id = account.id;

        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = test_service(repository);

        let session = service
            .login("Alice@Example.com", "Passw0rd!")
            .await
            .expect("Login failed");

        assert_eq!(session.account.id, account_id);
        assert!(!session.token.is_empty());

        // The issued credential resolves back to the same identity.
        let resolved = service.verify_token(&session.token).unwrap();
        assert_eq!(resolved, account_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestAccountRepository::new();

        let account = stored_account("alice@example.com", "Passw0rd!");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = test_service(repository);

        let result = service.login("alice@example.com", "Wrong_Pass1").await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error_as_wrong_password() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = test_service(repository);

        let result = service.login("nobody@example.com", "Passw0rd!").await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_empty_credentials_rejected_without_lookup() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_email().times(0);

        let service = test_service(repository);

        let result = service.login("", "Passw0rd!").await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::InvalidCredentials
        ));

        let result = service.login("alice@example.com", "").await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_verify_token_rejects_garbage() {
        let repository = MockTestAccountRepository::new();
        let service = test_service(repository);

        let result = service.verify_token("not.a.credential");
        assert!(matches!(result.unwrap_err(), AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_verify_token_rejects_foreign_signature() {
        let repository = MockTestAccountRepository::new();
        let service = test_service(repository);

        // Signed with a different secret
        let foreign = TokenCodec::new(b"another_secret_32_bytes_long_key!!", Duration::hours(24));
        let token = foreign
            .issue(&AccountId::new().to_string(), Utc::now())
            .unwrap();

        let result = service.verify_token(&token);
        assert!(matches!(result.unwrap_err(), AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_verify_token_rejects_expired() {
        let repository = MockTestAccountRepository::new();
        let service = test_service(repository);

        // Issued long enough ago that its 24h lifetime has passed
        let codec = TokenCodec::new(TEST_SECRET, Duration::hours(24));
        let token = codec
            .issue(
                &AccountId::new().to_string(),
                Utc::now() - Duration::days(2),
            )
            .unwrap();

        let result = service.verify_token(&token);
        assert!(matches!(result.unwrap_err(), AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_account_success() {
        let mut repository = MockTestAccountRepository::new();

        let account = stored_account("alice@example.com", "Passw0rd!");
        let account_id = account.id;

        repository
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = test_service(repository);

        let view = service.account(&account_id).await.unwrap();
        assert_eq!(view.id, account_id);
        assert_eq!(view.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_account_not_found() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = test_service(repository);

        let result = service.account(&AccountId::new()).await;
        assert!(matches!(result.unwrap_err(), AuthError::AccountNotFound(_)));
    }
}
