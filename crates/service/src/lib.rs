//! Service layer for luggage tracking.
//! - Separates lifecycle rules from data access.
//! - Reuses the entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod storage;
pub mod file;
pub mod luggage;
