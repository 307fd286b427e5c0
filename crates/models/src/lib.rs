pub mod errors;
pub mod luggage;

pub use luggage::{CheckInInput, LuggageItem, LuggageStatus, TransitionPolicy};
