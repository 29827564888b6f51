use std::{error::Error as StdError, path::PathBuf};

/// Crate-wide result type for plugin operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed plugin errors. Every plugin entry point returns these instead of
/// panicking, and the host decides how to present them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The credential directory or file does not exist.
    #[error("credentials not found at {}", .path.display())]
    CredentialsNotFound { path: PathBuf },

    /// The credential file exists but could not be used.
    #[error("invalid credentials file {}: {message}", .path.display())]
    InvalidCredentials { path: PathBuf, message: String },

    /// Channel configuration is not a JSON object of strings, or lacks the
    /// fields a plugin decodes it into.
    #[error("error json decoder")]
    ConfigDecode {
        #[source]
        source: serde_json::Error,
    },

    /// A required channel configuration key is absent.
    #[error("channel config is missing key `{key}`")]
    MissingKey { key: String },

    /// A configured endpoint or setting cannot be used as given.
    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },

    /// The OAuth provider rejected the token exchange.
    #[error("oauth provider error: {message}")]
    OAuthProvider { message: String },

    /// The publishing endpoint rejected the submission.
    #[error("submission failed{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Submission {
        status: Option<u16>,
        message: String,
    },

    /// The wiki reported that the page changed since `basetime`.
    #[error("edit conflict on page {page}")]
    EditConflict { page: String },

    /// The wiki answered with its password prompt.
    #[error("wiki rejected the credentials for page {page}")]
    AuthRejected { page: String },

    /// An outbound call exceeded the configured timeout.
    #[error("{context}: request timed out")]
    Timeout { context: String },

    /// Connection-level failure talking to a remote endpoint.
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// No plugin is registered under the requested module name.
    #[error("unknown plugin: {module}")]
    UnknownPlugin { module: String },

    /// The plugin does not provide the requested stage.
    #[error("plugin {module} does not support {operation}")]
    Unsupported {
        module: String,
        operation: &'static str,
    },
}

/// Stable classification of [`Error`] for hosts that dispatch on failure
/// causes without matching on the full enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    CredentialsNotFound,
    InvalidCredentials,
    ConfigDecode,
    MissingKey,
    InvalidSettings,
    #[serde(rename = "oauth_provider")]
    OAuthProvider,
    Submission,
    EditConflict,
    AuthRejected,
    Timeout,
    Transport,
    UnknownPlugin,
    Unsupported,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CredentialsNotFound => "credentials_not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::ConfigDecode => "config_decode",
            Self::MissingKey => "missing_key",
            Self::InvalidSettings => "invalid_settings",
            Self::OAuthProvider => "oauth_provider",
            Self::Submission => "submission",
            Self::EditConflict => "edit_conflict",
            Self::AuthRejected => "auth_rejected",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
            Self::UnknownPlugin => "unknown_plugin",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CredentialsNotFound { .. } => ErrorKind::CredentialsNotFound,
            Self::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            Self::ConfigDecode { .. } => ErrorKind::ConfigDecode,
            Self::MissingKey { .. } => ErrorKind::MissingKey,
            Self::InvalidSettings { .. } => ErrorKind::InvalidSettings,
            Self::OAuthProvider { .. } => ErrorKind::OAuthProvider,
            Self::Submission { .. } => ErrorKind::Submission,
            Self::EditConflict { .. } => ErrorKind::EditConflict,
            Self::AuthRejected { .. } => ErrorKind::AuthRejected,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::UnknownPlugin { .. } => ErrorKind::UnknownPlugin,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    /// Timeouts and connection failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Timeout | ErrorKind::Transport)
    }

    #[must_use]
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    #[must_use]
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn oauth_provider(message: impl Into<String>) -> Self {
        Self::OAuthProvider {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn submission(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Submission {
            status,
            message: message.into(),
        }
    }

    /// Classify a `reqwest` failure, keeping timeouts distinct from other
    /// transport errors.
    #[must_use]
    pub fn http(context: impl Into<String>, source: reqwest::Error) -> Self {
        let context = context.into();
        if source.is_timeout() {
            return Self::Timeout { context };
        }
        if let Some(status) = source.status() {
            return Self::Submission {
                status: Some(status.as_u16()),
                message: format!("{context}: {source}"),
            };
        }
        Self::Transport {
            context,
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn transport(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_decode_displays_legacy_marker() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::ConfigDecode { source };
        assert_eq!(err.to_string(), "error json decoder");
        assert_eq!(err.kind(), ErrorKind::ConfigDecode);
        assert!(!err.is_retryable());
    }

    #[test]
    fn submission_display_includes_status() {
        let err = Error::submission(Some(500), "boom");
        assert_eq!(err.to_string(), "submission failed (500): boom");
        let err = Error::submission(None, "boom");
        assert_eq!(err.to_string(), "submission failed: boom");
    }

    #[test]
    fn timeout_is_retryable() {
        let err = Error::Timeout {
            context: "wiki edit".into(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.kind().as_str(), "timeout");
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::OAuthProvider).unwrap();
        assert_eq!(json, "\"oauth_provider\"");
    }
}
