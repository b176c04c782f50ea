use thiserror::Error;

/// Failures of registration, login and token checks.
///
/// `Unauthorized` deliberately covers unknown email, wrong password and bad
/// tokens alike so callers cannot tell which accounts exist.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    Conflict,
    #[error("not authenticated")]
    Unauthorized,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token signing failed: {0}")]
    Token(String),
    #[error("account storage failed: {0}")]
    Storage(String),
}

impl AuthError {
    /// Numeric code carried in logs next to the message.
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::Unauthorized => 1004,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Storage(_) => 1200,
        }
    }
}
