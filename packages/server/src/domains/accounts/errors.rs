use thiserror::Error;

use super::jwt::TokenError;
use super::password::PasswordError;

/// Errors reported by the account store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    Conflict,

    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Errors surfaced by `AccountService`.
///
/// Every failure below the service boundary is converted into one of these.
/// Messages are safe to show to API clients; `Internal` carries the real cause
/// for logging only.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("invalid request data")]
    InvalidRequest,

    // Unknown phone and wrong password share this on purpose
    #[error("invalid phone number or password")]
    InvalidCredentials,

    #[error("invalid or missing token")]
    Unauthorized,

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("profile update failed")]
    UpdateFailed,

    #[error("internal server error")]
    Internal(#[source] anyhow::Error),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        AccountError::Internal(err.into())
    }
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        AccountError::Internal(err.into())
    }
}

impl From<TokenError> for AccountError {
    fn from(err: TokenError) -> Self {
        AccountError::Internal(err.into())
    }
}
