//! Shared primitives for all Stagecraft crates.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Stagecraft crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested configuration document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Document exists but does not match the expected schema.
    #[error("decode error: {0}")]
    Decode(String),

    /// Credential or identity-provider failure reported by the auth gateway.
    #[error("auth error: {0}")]
    Auth(String),

    /// Partial write while seeding default configuration documents.
    #[error("import error: {0}")]
    Import(String),

    /// Transport or storage failure from the document store.
    #[error("store error: {0}")]
    Store(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn errors_format_with_category_prefix() {
        let error = AppError::NotFound("config/splash".to_owned());
        assert_eq!(error.to_string(), "not found: config/splash");
    }

    #[test]
    fn decode_errors_carry_screen_context() {
        let error = AppError::Decode("config/home: missing field `welcomeText`".to_owned());
        assert!(error.to_string().starts_with("decode error:"));
    }
}
