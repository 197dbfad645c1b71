//! Error types for Smriti

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Smriti error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failure reported by a robot while executing a command
    #[error("Device error during {operation}: {reason}")]
    Device {
        /// Operation that failed ("move", "turn" or "beep")
        operation: &'static str,
        /// Device-specific description
        reason: String,
    },

    /// Malformed canonical instruction text
    #[error("Invalid instruction: {0}")]
    InvalidInstruction(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Binary encoding or decoding failed
    #[error("Encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration serialization error
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Replayed trace differs from the recorded one
    #[error("Replay mismatch: expected `{expected}`, got `{actual}`")]
    ReplayMismatch {
        /// Canonical rendering of the recording
        expected: String,
        /// Canonical rendering observed on the replay target
        actual: String,
    },
}

impl Error {
    /// Build a device failure for the given operation
    pub fn device(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Device {
            operation,
            reason: reason.into(),
        }
    }
}
