use thiserror::Error;

/// Errors raised by key generation and value wrapping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CacheError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for lifecycle or component-sequence misuse
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<config::ConfigError> for CacheError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_error() {
        let error = CacheError::invalid_state("wrapping should happen only once");
        assert_eq!(
            error.to_string(),
            "Invalid state: wrapping should happen only once"
        );
        assert!(error.is_invalid_state());
    }

    #[test]
    fn test_serialization_error_from_serde() {
        let err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let error: CacheError = err.into();

        assert!(matches!(error, CacheError::Serialization { .. }));
        assert!(!error.is_invalid_state());
    }

    #[test]
    fn test_configuration_error() {
        let error = CacheError::configuration("separator must be a single character");
        assert_eq!(
            error.to_string(),
            "Configuration error: separator must be a single character"
        );
    }
}
