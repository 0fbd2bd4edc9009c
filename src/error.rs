//! Custom error types for vair
//!
//! Catalog outcomes that are part of normal use (unknown id, sold-out
//! activity) live in [`CatalogError`]; bad input lives in [`ValidationError`].

use thiserror::Error;

/// Main error type for the vair library
#[derive(Error, Debug)]
pub enum VairError {
    /// Catalog lookups and reservations
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Signals returned by a reservation attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Activity not found: {0}")]
    NotFound(String),

    #[error("Fully booked: no spots left for {0}")]
    CapacityExceeded(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDirectory,

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration file: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(String),
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid passenger count: {0}. Must be between 1 and 9")]
    InvalidPassengers(u32),

    #[error("Invalid rating for {id}: {rating}. Must be between 0.0 and 5.0")]
    InvalidRating { id: String, rating: f64 },

    #[error("Invalid capacity for {id}: capacity {capacity}, booked {booked}")]
    InvalidCapacity { id: String, capacity: u32, booked: u32 },

    #[error("Duplicate activity id: {0}")]
    DuplicateId(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field value for {field}: {value}")]
    InvalidFieldValue { field: String, value: String },

    #[error("Amount out of range for {field}: {value}")]
    AmountOutOfRange { field: String, value: String },
}

/// Result type alias for the vair library
pub type Result<T> = std::result::Result<T, VairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VairError::Catalog(CatalogError::CapacityExceeded("osaka-shuriken".into()));
        assert!(err.to_string().contains("Fully booked"));

        let err = VairError::Validation(ValidationError::InvalidPassengers(12));
        assert!(err.to_string().contains("Must be between 1 and 9"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let vair_err: VairError = io_err.into();
        assert!(matches!(vair_err, VairError::Io(_)));

        let vair_err: VairError = CatalogError::NotFound("nowhere".into()).into();
        assert!(matches!(vair_err, VairError::Catalog(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_validation_errors() {
        let err = ValidationError::InvalidRating {
            id: "a1".to_string(),
            rating: 5.5,
        };
        assert!(err.to_string().contains("Must be between 0.0 and 5.0"));

        let err = ValidationError::MissingField("flight".to_string());
        assert_eq!(err.to_string(), "Missing required field: flight");
    }
}
