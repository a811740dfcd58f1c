//! Kernel module - server infrastructure and dependencies.

pub mod account_store;
pub mod test_dependencies;
pub mod traits;

pub use account_store::PostgresAccountStore;
pub use test_dependencies::MockAccountStore;
pub use traits::*;
