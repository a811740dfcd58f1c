// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Validation, hashing and token rules belong to domains/accounts and call these.
//
// Naming convention: Base* for trait names (e.g., BaseAccountStore)

use async_trait::async_trait;

use crate::common::AccountId;
use crate::domains::accounts::{Account, NewAccount, StoreError};

// =============================================================================
// Account Store Trait (Infrastructure - persistence)
// =============================================================================

/// Persistence for accounts.
///
/// Implementations own transactions, isolation and timeouts. Mutations are
/// keyed by account id and guarded by the value being replaced, so a caller
/// holding stale data gets `StoreError::NotFound` instead of clobbering a
/// newer change.
#[async_trait]
pub trait BaseAccountStore: Send + Sync {
    /// Look up an account by phone number
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, StoreError>;

    /// Create an account (`StoreError::Conflict` if the phone number is taken)
    async fn create(&self, account: NewAccount) -> Result<AccountId, StoreError>;

    async fn update_name(
        &self,
        id: AccountId,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError>;

    async fn update_phone(
        &self,
        id: AccountId,
        old_phone: &str,
        new_phone: &str,
    ) -> Result<(), StoreError>;

    /// Record a successful login
    async fn increment_login_count(&self, id: AccountId) -> Result<(), StoreError>;

    /// Cheap liveness probe for health checks
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
