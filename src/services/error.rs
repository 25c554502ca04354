use thiserror::Error;

use crate::domain::config::provider::ProviderKind;

/// Upload-time failures.
///
/// Transport failures (`Timeout`, `Network`) are distinct variants from
/// provider-rejected uploads (`UploadFailed`) so callers can tell a retryable
/// network problem from an application-level rejection. No retry is performed
/// here; errors propagate one level up to the immediate caller.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("provider \"{requested}\" is not registered. Available providers: {available}")]
    UnknownProvider { requested: String, available: String },

    #[error("{provider} configuration is incomplete: {message}")]
    MissingConfig {
        provider: ProviderKind,
        message: String,
    },

    #[error("{provider} upload failed: {message}")]
    UploadFailed {
        provider: ProviderKind,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl UploadError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::UnknownProvider { .. } => "UNKNOWN_PROVIDER",
            UploadError::MissingConfig { .. } => "MISSING_CONFIG",
            UploadError::UploadFailed { .. } => "UPLOAD_FAILED",
            UploadError::Timeout => "TIMEOUT",
            UploadError::Network(_) => "NETWORK_ERROR",
            UploadError::Internal(_) => "UNKNOWN_ERROR",
        }
    }

    /// The provider the failure originated from, when one was involved.
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            UploadError::MissingConfig { provider, .. }
            | UploadError::UploadFailed { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    /// True for failures below the application layer (candidates for a
    /// caller-side retry).
    pub fn is_transport(&self) -> bool {
        matches!(self, UploadError::Timeout | UploadError::Network(_))
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            UploadError::Timeout
        } else if error.is_connect() {
            UploadError::Network(format!("connection failed: {error}"))
        } else if error.is_request() || error.is_body() {
            UploadError::Network(error.to_string())
        } else {
            UploadError::Internal(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let failed = UploadError::UploadFailed {
            provider: ProviderKind::Imgbb,
            message: "rejected".to_string(),
            details: None,
        };
        assert_eq!(failed.code(), "UPLOAD_FAILED");
        assert_eq!(failed.provider(), Some(ProviderKind::Imgbb));
        assert!(!failed.is_transport());

        assert_eq!(UploadError::Timeout.code(), "TIMEOUT");
        assert!(UploadError::Timeout.is_transport());
        assert!(UploadError::Network("reset".to_string()).is_transport());
        assert_eq!(
            UploadError::Internal("oops".to_string()).code(),
            "UNKNOWN_ERROR"
        );
    }

    #[test]
    fn messages_name_the_provider() {
        let err = UploadError::MissingConfig {
            provider: ProviderKind::Cloudinary,
            message: "cloud name is required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cloudinary configuration is incomplete: cloud name is required"
        );
    }
}
