/// Error types for data source reads
use thiserror::Error;

use crate::api::ApiError;
use crate::schema::{StoreError, ValidationError};

#[derive(Debug, Error)]
pub enum DataSourceError {
    /// A page request failed or its pagination links were unreadable
    #[error("Error retrieving droplets: {0}")]
    Retrieve(#[source] ApiError),

    /// Writing the result into the output store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Flattened records could not be turned into a stored value
    #[error("Error encoding droplets: {0}")]
    Encode(#[from] serde_json::Error),

    /// Configuration did not pass schema validation
    #[error("Invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_converts_and_displays() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DataSourceError = cause.into();
        assert!(matches!(err, DataSourceError::Encode(_)));
        assert!(err.to_string().starts_with("Error encoding droplets: "));
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err = DataSourceError::from(StoreError::UnknownKey("droplets".into()));
        assert_eq!(err.to_string(), "Invalid address to set: \"droplets\"");
    }
}
