use thiserror::Error;

/// Errors returned by the user model and the profile picture uploader.
///
/// Every variant carries a single cause; callers see the first failure only.
#[derive(Debug, Error)]
pub enum UserError {
    /// Missing required field or malformed email, safe to show to the client.
    #[error("{0}")]
    Validation(String),

    #[error("Unknown validation mode: {0}")]
    UnknownValidationMode(String),

    #[error("User Not Found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Raised by the database driver, unique violations included.
    #[error(transparent)]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Upload(anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl UserError {
    pub(crate) fn validation(msg: &str) -> Self {
        UserError::Validation(msg.to_string())
    }

    /// True when the store rejected a write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            UserError::Store(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;
