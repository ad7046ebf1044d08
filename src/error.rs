use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sync error ({provider}): {message}")]
    Sync { provider: String, message: String },

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        Self::Auth(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn sync<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::Sync {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// True when the message carries no token material or raw transport
    /// detail and can go straight into a user-visible line.
    pub fn is_user_safe(&self) -> bool {
        match self {
            Self::Network(_) | Self::Storage(_) | Self::Anyhow(_) | Self::Serialization(_) => false,
            Self::Auth(_) | Self::Config(_) | Self::Sync { .. } | Self::NotImplemented(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_user_safe() {
            self.to_string()
        } else {
            match self {
                Self::Network(_) => "Network request failed".to_string(),
                Self::Storage(_) => "Storage operation failed".to_string(),
                Self::Serialization(_) => "Stored data could not be read".to_string(),
                _ => "Operation failed".to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
