use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
