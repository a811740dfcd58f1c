//! Accounts domain - phone-number accounts with password login
//!
//! Responsibilities:
//! - Input validation rules that gate signup, login and profile updates
//! - Password hashing and verification (Argon2id)
//! - Session JWT issuance and verification
//! - Orchestration of signup / login / profile through `AccountService`

pub mod errors;
pub mod jwt;
pub mod models;
pub mod password;
pub mod service;
pub mod validation;

pub use errors::{AccountError, StoreError};
pub use jwt::{Claims, JwtService, TokenError};
pub use models::{Account, Identity, NewAccount};
pub use password::{hash_password, verify_credentials, verify_password, PasswordError};
pub use service::{AccountService, ProfileChange};
pub use validation::{
    validate_full_name, validate_password, validate_phone_number, validate_signup_input,
    ValidationResult,
};
