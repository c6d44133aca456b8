//! Failure taxonomy of a single weather lookup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("City not found")]
    CityNotFound,

    #[error("Upstream responded with status {status}")]
    UpstreamError { status: u16 },

    #[error("Connection to weather service failed: {0}")]
    ConnectionFailure(String),

    #[error("Request to weather service timed out")]
    Timeout,

    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Unexpected failure: {0}")]
    UnknownFailure(String),
}

impl LookupError {
    /// Stable, log-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::CityNotFound => "city_not_found",
            Self::UpstreamError { .. } => "upstream_error",
            Self::ConnectionFailure(_) => "connection_failure",
            Self::Timeout => "timeout",
            Self::MalformedUpstreamResponse(_) => "malformed_upstream_response",
            Self::UnknownFailure(_) => "unknown_failure",
        }
    }

    /// HTTP status code the failure is reported with.
    ///
    /// `UpstreamError` mirrors the provider's own status.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::CityNotFound => 404,
            Self::UpstreamError { status } => *status,
            Self::ConnectionFailure(_)
            | Self::Timeout
            | Self::MalformedUpstreamResponse(_)
            | Self::UnknownFailure(_) => 500,
        }
    }

    /// Message safe to hand back to the caller. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::CityNotFound => "City not found".to_string(),
            Self::UpstreamError { .. } => "HTTP Error".to_string(),
            Self::ConnectionFailure(_) => "Failed to connect to weather service".to_string(),
            Self::Timeout => "Request to weather service timed out".to_string(),
            Self::MalformedUpstreamResponse(_) => "Invalid weather data format".to_string(),
            Self::UnknownFailure(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Classify a transport-level error from the HTTP client.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailure(err.to_string())
        } else {
            Self::UnknownFailure(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(LookupError::InvalidRequest("x".into()).status_code(), 400);
        assert_eq!(LookupError::CityNotFound.status_code(), 404);
        assert_eq!(LookupError::UpstreamError { status: 503 }.status_code(), 503);
        assert_eq!(LookupError::ConnectionFailure("refused".into()).status_code(), 500);
        assert_eq!(LookupError::Timeout.status_code(), 500);
        assert_eq!(LookupError::MalformedUpstreamResponse("x".into()).status_code(), 500);
        assert_eq!(LookupError::UnknownFailure("x".into()).status_code(), 500);
    }

    #[test]
    fn user_messages_hide_internal_details() {
        let err = LookupError::ConnectionFailure("dns error: no such host".into());
        assert_eq!(err.user_message(), "Failed to connect to weather service");

        let err = LookupError::MalformedUpstreamResponse("missing field `main`".into());
        assert!(!err.user_message().contains("main"));
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            LookupError::InvalidRequest(String::new()).kind(),
            LookupError::CityNotFound.kind(),
            LookupError::UpstreamError { status: 500 }.kind(),
            LookupError::ConnectionFailure(String::new()).kind(),
            LookupError::Timeout.kind(),
            LookupError::MalformedUpstreamResponse(String::new()).kind(),
            LookupError::UnknownFailure(String::new()).kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
