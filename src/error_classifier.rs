use crate::backend::error::BackendError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_backend_error(&self, error: &BackendError) -> LogLevel {
        match error {
            // Non-critical: upstream throttling or temporary server issues
            BackendError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: bad requests, malformed responses
            BackendError::Http { status, .. } if (400..=499).contains(status) => LogLevel::Error,
            BackendError::Decode(_) => LogLevel::Error,

            // The server itself reported the operation failed
            BackendError::Api(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16) -> BackendError {
        BackendError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_rate_limits_are_quiet() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_backend_error(&http_error(429)),
            LogLevel::Debug
        );
    }

    #[test]
    fn test_server_errors_warn() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_backend_error(&http_error(503)),
            LogLevel::Warn
        );
    }

    #[test]
    fn test_client_and_api_errors_are_errors() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_backend_error(&http_error(400)),
            LogLevel::Error
        );
        assert_eq!(
            classifier.classify_backend_error(&BackendError::Api("failed".to_string())),
            LogLevel::Error
        );
    }
}
