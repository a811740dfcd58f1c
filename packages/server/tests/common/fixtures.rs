//! Test fixtures for creating accounts and services.

#![allow(dead_code)]

use std::sync::Arc;

use account_core::domains::accounts::{AccountService, JwtService};
use account_core::kernel::{BaseAccountStore, MockAccountStore};

pub const TEST_SECRET: &str = "test_secret_key";
pub const TEST_ISSUER: &str = "test_issuer";

pub const PHONE: &str = "+62888732928";
pub const OTHER_PHONE: &str = "+62811223344";
pub const NAME: &str = "aaa";
pub const PASSWORD: &str = "aabaA1&";

pub fn jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::new(TEST_SECRET, TEST_ISSUER.to_string()))
}

/// Service backed by a fresh in-memory store; the store is returned for assertions
pub fn mock_service() -> (AccountService, Arc<MockAccountStore>) {
    service_with_store(MockAccountStore::new())
}

pub fn service_with_store(store: MockAccountStore) -> (AccountService, Arc<MockAccountStore>) {
    let store = Arc::new(store);
    let service = AccountService::new(store.clone() as Arc<dyn BaseAccountStore>, jwt_service());
    (service, store)
}

/// Sign up the default test account and return a login token for it
pub async fn signed_up_token(service: &AccountService) -> String {
    service
        .signup(PHONE, NAME, PASSWORD)
        .await
        .expect("signup should succeed");
    service
        .login(PHONE, PASSWORD)
        .await
        .expect("login should succeed")
}
