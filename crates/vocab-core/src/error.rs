use vocab_api::ApiError;

use crate::validation::ValidationError;

/// Failure of a collection request or of a client-side rule guarding one
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{message}")]
    Remote {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("{0}")]
    Rejected(String),
}

impl SyncError {
    /// Text the owning screen displays
    pub fn message(&self) -> &str {
        match self {
            SyncError::Remote { message, .. } => message,
            SyncError::Rejected(message) => message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage blob: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{}", .0.first().map(|e| e.message).unwrap_or_default())]
    Invalid(Vec<ValidationError>),

    #[error("Incorrect email or password!")]
    InvalidCredentials,

    #[error("{message}")]
    Remote {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("Password hashing failed: {0}")]
    Password(#[from] crate::password::PasswordError),

    #[error("Session storage failed: {0}")]
    Storage(#[from] StorageError),
}
