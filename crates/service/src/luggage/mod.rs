//! Luggage lifecycle: record store abstraction, call context, and the service
//! that drives check-in through collection.

pub mod context;
pub mod memory;
pub mod service;
pub mod store;

pub use context::{CallContext, RequestContext};
pub use memory::InMemoryLuggageStore;
pub use service::{CheckInOutcome, CollectOutcome, LifecyclePolicy, LuggageService, RemoveOutcome};
pub use store::LuggageStore;
