use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Non-2xx responses; the raw body is kept for the normalized error shape
    #[error("Request failed with status code {status}: {reason} (URL: {url})")]
    ApiHttp {
        status: u16,
        reason: String,
        body: Option<String>,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("{0}")]
    Unexpected(String),
}

/// Coarse failure taxonomy used when deciding how to report a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport or DNS failure, no response received
    Network,
    /// The server answered with a non-2xx status
    Http,
    /// Anything else that went wrong in the fetch pipeline
    Unexpected,
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an unexpected error with context
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Create an HTTP status error (any non-2xx status code)
    pub fn api_http(
        status: u16,
        reason: impl Into<String>,
        body: Option<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiHttp {
            status,
            reason: reason.into(),
            body,
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Folds the error into the network/http/unexpected taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NetworkTimeout { .. } | AppError::NetworkConnection { .. } => {
                ErrorKind::Network
            }
            AppError::ApiFetch(e) if e.is_timeout() || e.is_connect() => ErrorKind::Network,
            AppError::ApiFetch(e) if e.status().is_some() => ErrorKind::Http,
            AppError::ApiHttp { .. } => ErrorKind::Http,
            _ => ErrorKind::Unexpected,
        }
    }

    /// HTTP status code carried by the error, if the server answered at all
    pub fn http_status(&self) -> Option<u16> {
        match self {
            AppError::ApiHttp { status, .. } => Some(*status),
            AppError::ApiFetch(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body carried by the error, when one was received
    pub fn response_body(&self) -> Option<&str> {
        match self {
            AppError::ApiHttp { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_api_http_helper() {
        let error = AppError::api_http(
            404,
            "Not Found",
            Some("{\"message\":\"nope\"}".to_string()),
            "https://api.example.com/all_leagues.php",
        );
        assert_eq!(
            error.to_string(),
            "Request failed with status code 404: Not Found (URL: https://api.example.com/all_leagues.php)"
        );
        assert_eq!(error.http_status(), Some(404));
        assert_eq!(error.response_body(), Some("{\"message\":\"nope\"}"));
        assert_eq!(error.kind(), ErrorKind::Http);
    }

    #[test]
    fn test_network_errors_are_network_kind() {
        let timeout = AppError::network_timeout("https://api.example.com");
        let connection = AppError::network_connection("https://api.example.com", "refused");

        assert_eq!(timeout.kind(), ErrorKind::Network);
        assert_eq!(connection.kind(), ErrorKind::Network);
        assert_eq!(timeout.http_status(), None);
        assert_eq!(
            connection.to_string(),
            "Connection failed to: https://api.example.com - refused"
        );
    }

    #[test]
    fn test_other_errors_are_unexpected_kind() {
        let parse = AppError::api_unexpected_structure("missing field", "https://x.test");
        let custom = AppError::unexpected("boom");

        assert_eq!(parse.kind(), ErrorKind::Unexpected);
        assert_eq!(custom.kind(), ErrorKind::Unexpected);
        assert_eq!(custom.to_string(), "boom");
        assert_eq!(custom.response_body(), None);
    }
}
