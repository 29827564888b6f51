use {
    secrecy::ExposeSecret,
    tracing::{debug, warn},
    url::Url,
};

use crate::{
    Error, Result,
    state::generate_state,
    types::{AccessToken, OAuthConfig},
};

/// Manages the OAuth 2.0 authorization code flow for a confidential client.
pub struct OAuthFlow {
    config: OAuthConfig,
    client: reqwest::Client,
}

/// Result of starting the OAuth flow.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

impl OAuthFlow {
    pub fn new(config: OAuthConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Build the authorization URL with a fresh state for `channel_id`.
    pub fn authorization_url(&self, channel_id: &str) -> Result<AuthorizationRequest> {
        let state = generate_state(channel_id);

        let mut url = Url::parse(&self.config.auth_url)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("state", &state);

        debug!(channel_id, "built authorization url");
        Ok(AuthorizationRequest {
            url: url.to_string(),
            state,
        })
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange(&self, code: &str) -> Result<AccessToken> {
        let scope = self.config.scopes.join(" ");
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret().as_str()),
            ("scope", scope.as_str()),
        ];

        let resp = self
            .client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let json: Option<serde_json::Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = json
                .as_ref()
                .and_then(provider_error_message)
                .unwrap_or_else(|| body.trim().to_string());
            warn!(status = status.as_u16(), error = %message, "token exchange rejected");
            return Err(Error::provider(Some(status.as_u16()), message));
        }

        let json = json.ok_or_else(|| Error::provider(None, "token response is not JSON"))?;
        parse_token_response(&json)
    }
}

fn provider_error_message(resp: &serde_json::Value) -> Option<String> {
    let error = resp["error"].as_str();
    let description = resp["error_description"].as_str();
    match (error, description) {
        (Some(e), Some(d)) => Some(format!("{e}: {d}")),
        (Some(e), None) => Some(e.to_string()),
        (None, Some(d)) => Some(d.to_string()),
        (None, None) => None,
    }
}

fn parse_token_response(resp: &serde_json::Value) -> Result<AccessToken> {
    if let Some(message) = provider_error_message(resp) {
        return Err(Error::provider(None, message));
    }

    let access_token = resp["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::provider(None, "missing access_token in response"))?;
    let expires_in = resp["expires_in"].as_u64().unwrap_or_default();

    Ok(AccessToken::new(access_token, expires_in))
}
