//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores shared by the concrete stores in `file`.

pub mod json_map_store;
