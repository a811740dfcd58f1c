//! Account endpoints: signup, login, profile read and update.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::common::AccountId;
use crate::domains::accounts::{AccountError, Identity};
use crate::server::app::AppState;
use crate::server::middleware::BearerToken;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub phone_number: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: AccountId,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reasons: Vec<String>,
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = match &self {
            AccountError::Validation(_)
            | AccountError::InvalidRequest
            | AccountError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AccountError::Unauthorized | AccountError::UpdateFailed => StatusCode::FORBIDDEN,
            AccountError::Conflict(_) => StatusCode::CONFLICT,
            AccountError::Internal(e) => {
                error!(error = ?e, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let reasons = match &self {
            AccountError::Validation(reasons) => reasons.clone(),
            _ => Vec::new(),
        };

        let body = ErrorResponse {
            message: self.to_string(),
            reasons,
        };

        (status, Json(body)).into_response()
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AccountError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AccountError::InvalidRequest
    })
}

/// POST /signup
pub async fn signup_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, AccountError> {
    let request = json_body(payload)?;

    let id = state
        .account_service
        .signup(&request.phone_number, &request.full_name, &request.password)
        .await?;

    Ok(Json(SignupResponse {
        id,
        message: "Successfully signed up".to_string(),
    }))
}

/// POST /login
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AccountError> {
    let request = json_body(payload)?;

    let token = state
        .account_service
        .login(&request.phone_number, &request.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}

/// GET /profile
pub async fn get_profile_handler(
    Extension(state): Extension<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Identity>, AccountError> {
    state.account_service.get_profile(&token).map(Json)
}

/// PATCH /profile
pub async fn update_profile_handler(
    Extension(state): Extension<AppState>,
    BearerToken(token): BearerToken,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AccountError> {
    let request = json_body(payload)?;

    state
        .account_service
        .update_profile(
            &token,
            request.phone_number.as_deref(),
            request.full_name.as_deref(),
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Successfully updated user data".to_string(),
    }))
}
