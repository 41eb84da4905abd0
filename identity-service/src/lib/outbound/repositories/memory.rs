//! In-memory account store.
//!
//! Backs the integration-test harness; behaves like the Postgres
//! repository including atomic enforcement of email uniqueness.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;

pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AuthError> {
        // Uniqueness check and insert happen under one write lock, so of
        // two racing registrations for the same email exactly one wins.
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::Unknown("account store lock poisoned".to_string()))?;

        if accounts
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(AuthError::DuplicateAccount(
                account.email.as_str().to_string(),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AuthError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::Unknown("account store lock poisoned".to_string()))?;

        Ok(accounts.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::Unknown("account store lock poisoned".to_string()))?;

        Ok(accounts
            .values()
            .find(|account| &account.email == email)
            .cloned())
    }
}
