use thiserror::Error;

/// Unified error type for reqlog.
#[derive(Error, Debug)]
pub enum ReqlogError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid filter '{param}': {reason}")]
    InvalidFilter { param: &'static str, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Internal: {0}")]
    Internal(String),
}

impl ReqlogError {
    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ReqlogError::Validation(_) => 400,
            ReqlogError::InvalidFilter { .. } => 400,
            ReqlogError::Serde(_) => 400,
            _ => 500,
        }
    }

    /// Message safe to hand back to a caller. Server-side failures are
    /// reported generically; the detail goes to the log instead.
    pub fn public_message(&self) -> String {
        if self.status_code() >= 500 {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}
