use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Transport failure, non-2xx status and undecodable body all land here.
    RequestFailed { operation: String, reason: String },
    NotImplemented(&'static str),
    InvalidInput(String),
}

impl AppError {
    pub fn request_failed(operation: impl Into<String>, reason: impl fmt::Display) -> Self {
        AppError::RequestFailed {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::RequestFailed { operation, reason } => {
                write!(f, "Failed to {}: {}", operation, reason)
            }
            AppError::NotImplemented(operation) => write!(f, "{} not implemented", operation),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
