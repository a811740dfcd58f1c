// Account Service - API Core
//
// Signup, login and profile management for phone-number accounts,
// guarded by bearer-token (JWT) authentication.
//
// Business rules live in domains/accounts; storage and transport are thin edges
// in kernel/ and server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
