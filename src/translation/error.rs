//! Translation error types.

use thiserror::Error;

use crate::metadata::StoreError;

/// Result type for translation.
pub type TranslateResult<T> = Result<T, TranslateError>;

#[derive(Error, Debug)]
pub enum TranslateError {
    /// Entity or request config missing. Raised before any store call.
    #[error("invalid invocation: {0}")]
    InvalidInvocation(&'static str),

    /// Introspection, count or fetch failed; passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to convert row: {0}")]
    Row(#[source] serde_json::Error),
}
