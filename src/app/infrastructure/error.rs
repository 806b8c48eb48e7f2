use thiserror::Error;

/// Submission blocked by empty required fields or unticked confirmations.
/// Labels keep declaration order so they can be shown together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<String>,
}

impl ValidationError {
    /// Text for the blocking alert listing every missing field.
    pub fn alert_text(&self) -> String {
        format!(
            "Please fill in the following required fields:\n\n\u{2022} {}",
            self.missing.join("\n\u{2022} ")
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("endpoint URL is not configured")]
    EndpointNotConfigured,

    #[error("endpoint returned status {0}")]
    Status(i32),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to encode payload: {0}")]
    Encode(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Contract is already signed")]
    AlreadySigned,

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Settings("invalid stroke width".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid stroke width");

        let err: AppError = TransportError::Status(500).into();
        assert_eq!(err.to_string(), "Transport error: endpoint returned status 500");

        assert_eq!(AppError::AlreadySigned.to_string(), "Contract is already signed");
    }

    #[test]
    fn test_validation_alert_lists_every_label() {
        let err = ValidationError {
            missing: vec!["Project Title".to_string(), "Client Signature".to_string()],
        };
        assert_eq!(
            err.alert_text(),
            "Please fill in the following required fields:\n\n\u{2022} Project Title\n\u{2022} Client Signature"
        );
        assert_eq!(err.to_string(), "missing required fields: Project Title, Client Signature");
    }
}
