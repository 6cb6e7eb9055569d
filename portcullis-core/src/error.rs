use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let validation_error =
            Error::Validation(ValidationError::InvalidEmail("test@".to_string()));
        assert_eq!(
            validation_error.to_string(),
            "Validation error: Invalid email format: test@"
        );

        let storage_error = Error::Storage(StorageError::Io("permission denied".to_string()));
        assert_eq!(
            storage_error.to_string(),
            "Storage error: I/O error: permission denied"
        );
    }

    #[test]
    fn test_validation_error_variants() {
        let invalid_email = ValidationError::InvalidEmail("bad@".to_string());
        assert_eq!(invalid_email.to_string(), "Invalid email format: bad@");

        let invalid_field = ValidationError::InvalidField("role".to_string());
        assert_eq!(invalid_field.to_string(), "Invalid field: role");

        let missing_field = ValidationError::MissingField("email".to_string());
        assert_eq!(missing_field.to_string(), "Missing required field: email");
    }

    #[test]
    fn test_storage_error_variants() {
        let backend = StorageError::Backend("store unavailable".to_string());
        assert_eq!(backend.to_string(), "Backend error: store unavailable");

        let serialization = StorageError::Serialization("unexpected token".to_string());
        assert_eq!(
            serialization.to_string(),
            "Serialization error: unexpected token"
        );
    }

    #[test]
    fn test_is_validation_error() {
        assert!(
            Error::Validation(ValidationError::InvalidEmail("test".to_string()))
                .is_validation_error()
        );
        assert!(
            Error::Validation(ValidationError::MissingField("email".to_string()))
                .is_validation_error()
        );
        assert!(!Error::Storage(StorageError::Backend("x".to_string())).is_validation_error());
    }

    #[test]
    fn test_error_from_conversions() {
        let validation_error = ValidationError::MissingField("identifier".to_string());
        let error: Error = validation_error.into();
        assert!(matches!(
            error,
            Error::Validation(ValidationError::MissingField(_))
        ));

        let storage_error = StorageError::Io("disk full".to_string());
        let error: Error = storage_error.into();
        assert!(error.is_storage_error());
    }
}
