//! Error types for the cart store.
//!
//! Storage failures never abort a cart operation: they are reported back as
//! data ([`crate::SyncStatus`], [`crate::LoadOutcome`]) so callers can log or
//! ignore them. The only hard failure is reaching for the cart outside a
//! provider scope ([`ContextError`]).

use go_marketplace_core::CartError;
use thiserror::Error;

/// Errors that can occur while reading or writing the persisted cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying store could not be read or written.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The persisted record is not valid cart JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persisted record parsed but violates a cart invariant.
    #[error("corrupt cart record: {0}")]
    Corrupt(#[from] CartError),
}

impl StorageError {
    /// Wrap an I/O error with a description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Errors raised when resolving the cart from the current scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// `use_cart` was called outside of `provide`.
    #[error("use_cart must be called within a cart provider scope")]
    MissingProvider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_context() {
        let err = StorageError::io(
            "writing cart record",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "writing cart record: denied");
    }

    #[test]
    fn test_missing_provider_message() {
        assert_eq!(
            ContextError::MissingProvider.to_string(),
            "use_cart must be called within a cart provider scope"
        );
    }
}
