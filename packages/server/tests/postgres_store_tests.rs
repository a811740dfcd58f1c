//! Integration tests for the Postgres account store.
//!
//! Requires Docker (testcontainers starts a shared Postgres 16 container).

mod common;

use std::sync::Arc;

use account_core::common::AccountId;
use account_core::domains::accounts::{
    hash_password, verify_password, Account, AccountError, AccountService, NewAccount, StoreError,
};
use account_core::kernel::{BaseAccountStore, PostgresAccountStore};
use common::{jwt_service, unique_phone, TestHarness, PASSWORD};
use test_context::test_context;

fn new_account(phone_number: &str) -> NewAccount {
    NewAccount {
        phone_number: phone_number.to_string(),
        full_name: "Budi".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_create_and_find_by_phone(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());
    let phone = unique_phone();

    let id = store.create(new_account(&phone)).await.unwrap();

    let account = store.find_by_phone(&phone).await.unwrap().unwrap();
    assert_eq!(account.id, id);
    assert_eq!(account.full_name, "Budi");
    assert_eq!(account.successful_login, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_find_unknown_phone(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());

    assert!(store.find_by_phone(&unique_phone()).await.unwrap().is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_duplicate_phone_is_conflict(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());
    let phone = unique_phone();
    store.create(new_account(&phone)).await.unwrap();

    let result = store.create(new_account(&phone)).await;

    assert!(matches!(result, Err(StoreError::Conflict)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_update_name_guarded_by_old_value(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());
    let phone = unique_phone();
    let id = store.create(new_account(&phone)).await.unwrap();

    store.update_name(id, "Budi", "Budi Santoso").await.unwrap();

    // Stale old value matches nothing
    let stale = store.update_name(id, "Budi", "Someone Else").await;
    assert!(matches!(stale, Err(StoreError::NotFound)));

    let account = Account::find_by_id(id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(account.full_name, "Budi Santoso");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_update_phone(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());
    let phone = unique_phone();
    let new_phone = unique_phone();
    let id = store.create(new_account(&phone)).await.unwrap();

    store.update_phone(id, &phone, &new_phone).await.unwrap();

    assert!(store.find_by_phone(&phone).await.unwrap().is_none());
    assert_eq!(store.find_by_phone(&new_phone).await.unwrap().unwrap().id, id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_update_phone_to_taken_number_is_conflict(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());
    let phone = unique_phone();
    let taken = unique_phone();
    let id = store.create(new_account(&phone)).await.unwrap();
    store.create(new_account(&taken)).await.unwrap();

    let result = store.update_phone(id, &phone, &taken).await;

    assert!(matches!(result, Err(StoreError::Conflict)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_increment_login_count(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());
    let id = store.create(new_account(&unique_phone())).await.unwrap();

    store.increment_login_count(id).await.unwrap();
    store.increment_login_count(id).await.unwrap();

    let account = Account::find_by_id(id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(account.successful_login, 2);

    let missing = store.increment_login_count(AccountId::new()).await;
    assert!(matches!(missing, Err(StoreError::NotFound)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_health_check(ctx: &TestHarness) {
    let store = PostgresAccountStore::new(ctx.db_pool.clone());
    assert!(store.health_check().await.is_ok());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn test_service_end_to_end_on_postgres(ctx: &TestHarness) {
    let store = Arc::new(PostgresAccountStore::new(ctx.db_pool.clone()));
    let service = AccountService::new(store.clone(), jwt_service());
    let phone = unique_phone();

    let id = service.signup(&phone, "Budi", PASSWORD).await.unwrap();
    let duplicate = service.signup(&phone, "Budi", PASSWORD).await;
    assert!(matches!(duplicate, Err(AccountError::Conflict(_))));

    let token = service.login(&phone, PASSWORD).await.unwrap();
    let profile = service.get_profile(&token).unwrap();
    assert_eq!(profile.phone_number, phone);

    service
        .update_profile(&token, None, Some("Budi Santoso"))
        .await
        .unwrap();

    let account = Account::find_by_id(id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(account.full_name, "Budi Santoso");
    assert_eq!(account.successful_login, 1);
    assert!(verify_password(PASSWORD, &account.password_hash));
    assert!(!verify_password("Other9!x", &account.password_hash));
}

#[test]
fn test_hash_fixture_shape() {
    // Real hashes share the PHC prefix used by the fixture above
    let hash = hash_password(PASSWORD).unwrap();
    assert!(hash.starts_with("$argon2id$v=19$"));
}
