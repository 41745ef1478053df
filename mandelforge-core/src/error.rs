use thiserror::Error;

/// Errors originating from the core fractal engine: configuration and
/// viewport validation. Classification itself never fails — `Undetermined`
/// is a value, not an error.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid render config: {reason}")]
    InvalidConfig { reason: String },
}
