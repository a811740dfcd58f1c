//! Postgres-backed account store.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use crate::common::AccountId;
use crate::domains::accounts::{Account, NewAccount, StoreError};
use crate::kernel::BaseAccountStore;

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map write errors, turning unique violations into conflicts
fn write_error(err: sqlx::Error, action: &'static str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict,
        _ => {
            error!(error = %err, "Failed to {}", action);
            StoreError::Backend(anyhow::Error::new(err).context(action))
        }
    }
}

fn expect_one_row(rows: u64) -> Result<(), StoreError> {
    if rows == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

#[async_trait]
impl BaseAccountStore for PostgresAccountStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, StoreError> {
        Account::find_by_phone(phone_number, &self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up account by phone number");
                StoreError::Backend(e)
            })
    }

    async fn create(&self, account: NewAccount) -> Result<AccountId, StoreError> {
        Account::insert(&account, &self.pool)
            .await
            .map(|created| created.id)
            .map_err(|e| write_error(e, "insert account"))
    }

    async fn update_name(
        &self,
        id: AccountId,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError> {
        let rows = Account::update_name(id, old_name, new_name, &self.pool)
            .await
            .map_err(|e| write_error(e, "update full name"))?;
        expect_one_row(rows)
    }

    async fn update_phone(
        &self,
        id: AccountId,
        old_phone: &str,
        new_phone: &str,
    ) -> Result<(), StoreError> {
        let rows = Account::update_phone(id, old_phone, new_phone, &self.pool)
            .await
            .map_err(|e| write_error(e, "update phone number"))?;
        expect_one_row(rows)
    }

    async fn increment_login_count(&self, id: AccountId) -> Result<(), StoreError> {
        let rows = Account::increment_login_count(id, &self.pool)
            .await
            .map_err(|e| write_error(e, "increment login count"))?;
        expect_one_row(rows)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Health check query failed")?;
        Ok(())
    }
}
