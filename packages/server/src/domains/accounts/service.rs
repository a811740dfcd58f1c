//! Account orchestration: signup, login, profile read and update.
//!
//! Every failure is converted to an `AccountError` here; nothing from the
//! store, hasher or token layer leaks past this boundary unclassified.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, error, info, warn};

use super::errors::{AccountError, StoreError};
use super::jwt::{Claims, JwtService};
use super::models::{Identity, NewAccount};
use super::password::{hash_password, verify_credentials};
use super::validation::{
    validate_full_name, validate_password, validate_phone_number, validate_signup_input,
};
use crate::common::AccountId;
use crate::kernel::BaseAccountStore;

/// Which profile field an update changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChange {
    PhoneNumber(String),
    FullName(String),
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn BaseAccountStore>,
    jwt_service: Arc<JwtService>,
}

impl AccountService {
    pub fn new(store: Arc<dyn BaseAccountStore>, jwt_service: Arc<JwtService>) -> Self {
        Self { store, jwt_service }
    }

    pub fn store(&self) -> &Arc<dyn BaseAccountStore> {
        &self.store
    }

    /// Register a new account.
    ///
    /// All validation reasons are reported together; nothing is stored unless
    /// every rule passes.
    pub async fn signup(
        &self,
        phone_number: &str,
        full_name: &str,
        password: &str,
    ) -> Result<AccountId, AccountError> {
        let validation = validate_signup_input(phone_number, full_name, password);
        if !validation.valid {
            debug!(reasons = ?validation.reasons, "Signup rejected by validation");
            return Err(AccountError::Validation(validation.reasons));
        }

        let password_hash = run_blocking("Password hashing task failed", {
            let password = password.to_string();
            move || hash_password(&password)
        })
        .await??;

        let new_account = NewAccount {
            phone_number: phone_number.to_string(),
            full_name: full_name.to_string(),
            password_hash,
        };

        match self.store.create(new_account).await {
            Ok(id) => {
                info!(account_id = %id, "Account created");
                Ok(id)
            }
            Err(StoreError::Conflict) => {
                info!("Signup rejected: phone number already registered");
                Err(AccountError::Conflict("account"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown phone numbers and wrong passwords produce the same error and
    /// take the same Argon2 work.
    pub async fn login(&self, phone_number: &str, password: &str) -> Result<String, AccountError> {
        if !validate_phone_number(phone_number) || !validate_password(password) {
            return Err(AccountError::InvalidRequest);
        }

        let account = self.store.find_by_phone(phone_number).await?;

        // Unknown phone numbers still pay for a full verification
        let password_matches = run_blocking("Password verification task failed", {
            let password = password.to_string();
            let password_hash = account.as_ref().map(|a| a.password_hash.clone());
            move || verify_credentials(&password, password_hash.as_deref())
        })
        .await?;

        let account = match account {
            Some(account) if password_matches => account,
            Some(account) => {
                info!(account_id = %account.id, "Login rejected: invalid credentials");
                return Err(AccountError::InvalidCredentials);
            }
            None => {
                info!("Login rejected: invalid credentials");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let token = self.jwt_service.create_token(
            account.id,
            account.full_name.clone(),
            account.phone_number.clone(),
        )?;

        // The login only counts once it is recorded
        self.store.increment_login_count(account.id).await?;

        info!(account_id = %account.id, "Login succeeded");
        Ok(token)
    }

    /// Verify a bearer token and return its claims.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AccountError> {
        self.jwt_service.verify_token(token).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            AccountError::Unauthorized
        })
    }

    /// Profile as recorded in the token at login time.
    ///
    /// This is not re-read from storage, so it reflects the account as it was
    /// when the token was issued.
    pub fn get_profile(&self, token: &str) -> Result<Identity, AccountError> {
        let claims = self.authenticate(token)?;
        Ok(Identity {
            full_name: claims.full_name,
            phone_number: claims.phone_number,
        })
    }

    /// Change either the phone number or the full name.
    ///
    /// A valid phone number wins. An absent or invalid phone number falls
    /// through to the name; only when neither is usable is the request
    /// rejected. At most one field changes per call.
    pub async fn update_profile(
        &self,
        token: &str,
        new_phone: Option<&str>,
        new_name: Option<&str>,
    ) -> Result<ProfileChange, AccountError> {
        let claims = self.authenticate(token)?;

        let new_phone = new_phone.filter(|p| !p.is_empty() && validate_phone_number(p));
        let new_name = new_name.filter(|n| !n.is_empty() && validate_full_name(n));

        match (new_phone, new_name) {
            (Some(phone), _) => self.change_phone(&claims, phone).await,
            (None, Some(name)) => self.change_name(&claims, name).await,
            (None, None) => Err(AccountError::InvalidRequest),
        }
    }

    async fn change_phone(
        &self,
        claims: &Claims,
        new_phone: &str,
    ) -> Result<ProfileChange, AccountError> {
        if self.store.find_by_phone(new_phone).await?.is_some() {
            return Err(AccountError::Conflict("phone number"));
        }

        match self
            .store
            .update_phone(claims.account_id, &claims.phone_number, new_phone)
            .await
        {
            Ok(()) => {
                info!(account_id = %claims.account_id, "Phone number updated");
                Ok(ProfileChange::PhoneNumber(new_phone.to_string()))
            }
            Err(StoreError::Conflict) => Err(AccountError::Conflict("phone number")),
            Err(StoreError::NotFound) => {
                warn!(account_id = %claims.account_id, "Phone update matched no account (stale token?)");
                Err(AccountError::UpdateFailed)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn change_name(
        &self,
        claims: &Claims,
        new_name: &str,
    ) -> Result<ProfileChange, AccountError> {
        match self
            .store
            .update_name(claims.account_id, &claims.full_name, new_name)
            .await
        {
            Ok(()) => {
                info!(account_id = %claims.account_id, "Full name updated");
                Ok(ProfileChange::FullName(new_name.to_string()))
            }
            Err(StoreError::NotFound) => {
                warn!(account_id = %claims.account_id, "Name update matched no account (stale token?)");
                Err(AccountError::UpdateFailed)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Run CPU-heavy work (Argon2) off the async executor
async fn run_blocking<T, F>(task: &'static str, f: F) -> Result<T, AccountError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context(task)
        .map_err(|e| {
            error!(error = %e, "Blocking task did not complete");
            AccountError::Internal(e)
        })
}
