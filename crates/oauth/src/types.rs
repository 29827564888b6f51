use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Expiry assigned to tokens re-wrapped from a stored string, whose real
/// expiry the host does not keep.
pub const UNKNOWN_EXPIRY_SECS: u64 = 99_999_999;

/// OAuth 2.0 client configuration for one provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: Secret<String>,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    /// Permissions requested in the authentication context.
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Access token obtained from a code exchange.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(serialize_with = "serialize_secret")]
    pub access_token: Secret<String>,
    /// Lifetime in seconds, as reported by the provider.
    pub expires_in: u64,
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            access_token: Secret::new(access_token.into()),
            expires_in,
        }
    }

    /// Wrap a token string the host stored earlier.
    pub fn from_stored(access_token: impl Into<String>) -> Self {
        Self::new(access_token, UNKNOWN_EXPIRY_SECS)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Serialize a `Secret<String>` by exposing its inner value.
/// Use only for fields the caller must store (token handed back to the host).
pub fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_serialization_omits_client_secret() {
        let config = OAuthConfig {
            client_id: "client-123".into(),
            client_secret: Secret::new("hunter2".into()),
            auth_url: "https://www.linkedin.com/oauth/v2/authorization".into(),
            token_url: "https://www.linkedin.com/oauth/v2/accessToken".into(),
            redirect_uri: "http://localhost:5000/configure/linkedin".into(),
            scopes: vec!["w_share".into()],
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["client_id"], "client-123");
        assert!(json.get("client_secret").is_none());
        assert!(!json.to_string().contains("hunter2"));
    }

    #[test]
    fn access_token_serializes_for_the_host() {
        let json = serde_json::to_value(AccessToken::new("AQV", 60)).unwrap();
        assert_eq!(json, serde_json::json!({ "access_token": "AQV", "expires_in": 60 }));
    }
}
