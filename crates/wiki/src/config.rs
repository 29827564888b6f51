use {
    secrecy::Secret,
    serde::Deserialize,
    superform_publishing::{ChannelConfig, Result},
};

/// Edit credentials stored on a wiki channel.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiChannelConfig {
    pub username: String,
    pub password: Secret<String>,
}

impl WikiChannelConfig {
    /// Decode the stored channel config. A missing field is reported the
    /// same way as malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        ChannelConfig::decode(raw)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, secrecy::ExposeSecret, superform_publishing::ErrorKind};

    #[test]
    fn decodes_username_and_password() {
        let config =
            WikiChannelConfig::from_json(r#"{"username":"editor","password":"pw"}"#).unwrap();
        assert_eq!(config.username, "editor");
        assert_eq!(config.password.expose_secret(), "pw");
    }

    #[test]
    fn missing_password_reads_as_decode_error() {
        let err = WikiChannelConfig::from_json(r#"{"username":"editor"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigDecode);
        assert_eq!(err.to_string(), "error json decoder");
    }

    #[test]
    fn password_is_redacted_in_debug() {
        let config =
            WikiChannelConfig::from_json(r#"{"username":"editor","password":"hunter2"}"#).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
