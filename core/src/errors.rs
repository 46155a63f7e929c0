use thiserror::Error;

/// Failure talking to the expense backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("not authorized")]
    Unauthorized,
}

impl ApiError {
    /// Map a non-success HTTP status into the matching variant
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized,
            _ => ApiError::Status {
                status,
                body: body.into(),
            },
        }
    }
}

/// Local validation failure for an expense draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid amount.")]
    InvalidAmount(String),
    #[error("Amount must be greater than 0.")]
    AmountNotPositive,
    #[error("Amount cannot exceed {0}.")]
    AmountTooLarge(String),
    #[error("Description is required.")]
    EmptyDescription,
    #[error("Please enter a valid date (YYYY-MM-DD).")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);
