//! File-backed store implementations.

pub mod luggage_store;
