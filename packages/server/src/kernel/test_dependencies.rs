// TestDependencies - mock implementations for testing
//
// Provides an in-memory account store that can be injected into AccountService for tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::BaseAccountStore;
use crate::common::AccountId;
use crate::domains::accounts::{Account, NewAccount, StoreError};

// =============================================================================
// Mock Account Store
// =============================================================================

pub struct MockAccountStore {
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    fail_login_count: AtomicBool,
    fail_health_check: AtomicBool,
    conflict_phone_update: AtomicBool,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            fail_login_count: AtomicBool::new(false),
            fail_health_check: AtomicBool::new(false),
            conflict_phone_update: AtomicBool::new(false),
        }
    }

    /// Make `increment_login_count` fail with a backend error
    pub fn with_failing_login_count(self) -> Self {
        self.fail_login_count.store(true, Ordering::SeqCst);
        self
    }

    /// Make `health_check` fail with a backend error
    pub fn with_failing_health_check(self) -> Self {
        self.fail_health_check.store(true, Ordering::SeqCst);
        self
    }

    /// Make `update_phone` hit the unique index, as when another account
    /// claims the number between the lookup and the write
    pub fn with_conflicting_phone_update(self) -> Self {
        self.conflict_phone_update.store(true, Ordering::SeqCst);
        self
    }

    /// Get an account by phone number
    pub fn account_by_phone(&self, phone_number: &str) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.phone_number == phone_number)
            .cloned()
    }

    pub fn account(&self, id: AccountId) -> Option<Account> {
        self.accounts.lock().unwrap().get(&id).cloned()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

impl Default for MockAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

fn phone_taken(accounts: &HashMap<AccountId, Account>, phone_number: &str) -> bool {
    accounts.values().any(|a| a.phone_number == phone_number)
}

#[async_trait]
impl BaseAccountStore for MockAccountStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.account_by_phone(phone_number))
    }

    async fn create(&self, account: NewAccount) -> Result<AccountId, StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        if phone_taken(&accounts, &account.phone_number) {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let id = AccountId::new();
        accounts.insert(
            id,
            Account {
                id,
                phone_number: account.phone_number,
                full_name: account.full_name,
                password_hash: account.password_hash,
                successful_login: 0,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update_name(
        &self,
        id: AccountId,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(&id) {
            Some(account) if account.full_name == old_name => {
                account.full_name = new_name.to_string();
                account.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    async fn update_phone(
        &self,
        id: AccountId,
        old_phone: &str,
        new_phone: &str,
    ) -> Result<(), StoreError> {
        let mut accounts = self.accounts.lock().unwrap();
        if self.conflict_phone_update.load(Ordering::SeqCst) || phone_taken(&accounts, new_phone) {
            return Err(StoreError::Conflict);
        }

        match accounts.get_mut(&id) {
            Some(account) if account.phone_number == old_phone => {
                account.phone_number = new_phone.to_string();
                account.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    async fn increment_login_count(&self, id: AccountId) -> Result<(), StoreError> {
        if self.fail_login_count.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "mock store: login counter unavailable"
            )));
        }

        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts.get_mut(&id).ok_or(StoreError::NotFound)?;
        account.successful_login += 1;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.fail_health_check.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(anyhow::anyhow!("mock store: unavailable")));
        }
        Ok(())
    }
}
