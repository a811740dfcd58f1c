// Business domains
pub mod accounts;
