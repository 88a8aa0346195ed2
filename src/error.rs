//! One error enum for every failure kind the engine can surface. `main`
//! maps each variant to an exit code; nothing here is recovered locally,
//! matching the "successful batch or terminated batch" model.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("malformed card: {0}")]
    InvalidCard(String),

    #[error("malformed hand: {0}")]
    InvalidHand(String),

    #[error("duplicate card: {0}")]
    DuplicateCard(String),

    #[error("device failure on {device}: {detail}")]
    DeviceFailure { device: String, detail: String },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    /// Process exit code for this error: every variant is 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
