// Common types and utilities shared across the application

pub mod entity_ids;

pub use entity_ids::*;
