//! Error types for profile operations
//!
//! Errors are classified by how the caller recovers:
//! - Rejected input: bad energy level, malformed date, out-of-range pillar index
//! - Capacity: root-wound cap reached (strict mode only)
//! - External: text-generation unavailable — always replaced by a fallback
//!   message, never surfaced as a hard failure

use thiserror::Error;

/// Error types for profile and session operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Pillar index {index} out of range (0..{count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Text generation unavailable: {0}")]
    ExternalServiceUnavailable(String),

    #[error("No profile loaded")]
    NoProfile,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true if the session can continue after showing a message.
    ///
    /// Everything except IO/serialization faults is recoverable in place:
    /// bad input is re-prompted, capacity is a no-op, external failures get
    /// a fallback string.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Io(_) | AppError::Json(_))
    }

    /// User-facing message for recoverable conditions.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::IndexOutOfRange { index, count } => {
                format!("Pillar {} does not exist (you have {} pillars)", index + 1, count)
            }
            AppError::LimitExceeded(msg) => msg.clone(),
            AppError::ExternalServiceUnavailable(_) => {
                "The stars are silent right now. Trust your own internal rhythm.".to_string()
            }
            AppError::NoProfile => "No profile loaded. Sign up first.".to_string(),
            AppError::Io(e) => format!("Storage error: {}", e),
            AppError::Json(e) => format!("Data format error: {}", e),
        }
    }
}
