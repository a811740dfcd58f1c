// HTTP routes
pub mod accounts;
pub mod health;

pub use accounts::*;
pub use health::*;
