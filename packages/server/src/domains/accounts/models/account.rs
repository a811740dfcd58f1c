use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::AccountId;

/// Account model - SQL persistence layer
///
/// `password_hash` is an Argon2 PHC string; the plaintext password is never stored.
#[derive(sqlx::FromRow, Clone)]
pub struct Account {
    pub id: AccountId,
    pub phone_number: String,
    pub full_name: String,
    pub password_hash: String,
    pub successful_login: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("phone_number", &self.phone_number)
            .field("full_name", &self.full_name)
            .field("password_hash", &"<redacted>")
            .field("successful_login", &self.successful_login)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Data needed to create an account
#[derive(Clone)]
pub struct NewAccount {
    pub phone_number: String,
    pub full_name: String,
    pub password_hash: String,
}

/// Public profile of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub full_name: String,
    pub phone_number: String,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Account {
    /// Find account by phone number
    pub async fn find_by_phone(phone_number: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find account by ID; used for verification reads after writes
    pub async fn find_by_id(id: AccountId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new account
    ///
    /// Fails with a unique violation if the phone number is taken.
    pub async fn insert(new: &NewAccount, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO accounts (id, phone_number, full_name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(AccountId::new())
        .bind(&new.phone_number)
        .bind(&new.full_name)
        .bind(&new.password_hash)
        .fetch_one(pool)
        .await
    }

    /// Rename an account, only if its name is still `old_name`
    ///
    /// Returns the number of rows changed (0 or 1).
    pub async fn update_name(
        id: AccountId,
        old_name: &str,
        new_name: &str,
        pool: &PgPool,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            "UPDATE accounts
             SET full_name = $3, updated_at = NOW()
             WHERE id = $1 AND full_name = $2",
        )
        .bind(id)
        .bind(old_name)
        .bind(new_name)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Change an account's phone number, only if it is still `old_phone`
    pub async fn update_phone(
        id: AccountId,
        old_phone: &str,
        new_phone: &str,
        pool: &PgPool,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            "UPDATE accounts
             SET phone_number = $3, updated_at = NOW()
             WHERE id = $1 AND phone_number = $2",
        )
        .bind(id)
        .bind(old_phone)
        .bind(new_phone)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Increment successful login count
    pub async fn increment_login_count(id: AccountId, pool: &PgPool) -> sqlx::Result<u64> {
        let result = sqlx::query(
            "UPDATE accounts SET successful_login = successful_login + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let account = Account {
            id: AccountId::new(),
            phone_number: "+62888732928".to_string(),
            full_name: "Budi".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            successful_login: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let printed = format!("{:?}", account);
        assert!(!printed.contains("argon2id"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("+62888732928"));
    }
}
