use {
    async_trait::async_trait,
    serde::Deserialize,
    superform_config::LinkedInSettings,
    superform_oauth::{AccessToken, AuthorizationRequest},
    superform_publishing::{
        Channel, ChannelConfig, ChannelConfigurator, ConfigField, ConfigureView, Error,
        PublishPlugin, PublishReceipt, Publication, Result,
    },
    tracing::{debug, info, warn},
};

use crate::{
    api::{LinkedInApplication, Share},
    auth::authentication,
    credentials::Credentials,
    format::format_comment,
};

pub const MODULE_ID: &str = "linkedin";
pub const CONFIGURATION_TEMPLATE: &str = "linkedin_configuration.html";

/// Publication fields LinkedIn shares have no place for.
pub const FIELDS_UNAVAILABLE: &[&str] = &["Title", "Description"];
pub const CONFIG_FIELDS: &[&str] = &[];

/// Channel config key holding the member access token.
pub const TOKEN_KEY: &str = "token";

/// Stored LinkedIn channel config. Other keys the host merges in, such as
/// `expires_in`, are ignored whatever their type.
#[derive(Debug, Default, Deserialize)]
pub struct LinkedInChannelConfig {
    pub token: Option<String>,
}

impl LinkedInChannelConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        ChannelConfig::decode(raw)
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| Error::missing_key(TOKEN_KEY))
    }
}

/// Publishes publications as LinkedIn shares.
pub struct LinkedInPlugin {
    credentials: Credentials,
    settings: LinkedInSettings,
    http: reqwest::Client,
}

impl LinkedInPlugin {
    pub fn new(credentials: Credentials, settings: LinkedInSettings, http: reqwest::Client) -> Self {
        Self {
            credentials,
            settings,
            http,
        }
    }

    /// Authorization redirect for `channel_id`, with a fresh state value.
    pub fn authorization_request(&self, channel_id: &str) -> Result<AuthorizationRequest> {
        authentication(&self.credentials, &self.settings, self.http.clone())
            .authorization_url(channel_id)
            .map_err(oauth_error)
    }

    /// Trade the code from the authorization callback for an access token.
    ///
    /// The caller stores the token in the channel config under `token`.
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<AccessToken> {
        let flow = authentication(&self.credentials, &self.settings, self.http.clone());
        match flow.exchange(code).await {
            Ok(token) => {
                info!(expires_in = token.expires_in, "obtained LinkedIn access token");
                Ok(token)
            },
            Err(e) => {
                warn!(error = %e, "a fault occurred while getting the access token");
                Err(oauth_error(e))
            },
        }
    }

    /// Submit `share` on behalf of the member owning `token`.
    pub async fn post(&self, token: &str, share: &Share) -> Result<serde_json::Value> {
        let application = LinkedInApplication::new(
            self.http.clone(),
            &self.settings.api_base,
            AccessToken::from_stored(token),
        );

        match application.get_profile().await {
            Ok(profile) => debug!(profile = %profile, "LinkedIn user profile"),
            Err(e) => warn!(error = %e, "could not fetch LinkedIn profile"),
        }

        application.submit_share(share).await
    }
}

fn oauth_error(e: superform_oauth::Error) -> Error {
    match e {
        superform_oauth::Error::Reqwest(source) => Error::http("LinkedIn token exchange", source),
        superform_oauth::Error::UrlParse(e) => {
            Error::invalid_settings(format!("LinkedIn authorize url: {e}"))
        },
        provider @ superform_oauth::Error::Provider { .. } => {
            Error::oauth_provider(provider.to_string())
        },
    }
}

#[async_trait]
impl PublishPlugin for LinkedInPlugin {
    fn id(&self) -> &str {
        MODULE_ID
    }

    fn name(&self) -> &str {
        "LinkedIn"
    }

    fn fields_unavailable(&self) -> &'static [&'static str] {
        FIELDS_UNAVAILABLE
    }

    fn config_fields(&self) -> &'static [&'static str] {
        CONFIG_FIELDS
    }

    async fn run(
        &self,
        publication: &Publication,
        channel_config: &str,
    ) -> Result<PublishReceipt> {
        let config = LinkedInChannelConfig::from_json(channel_config)?;
        let token = config.require_token()?;

        let comment = format_comment(publication);
        debug!(
            title = %publication.title,
            body = %publication.description,
            link = publication.link().unwrap_or_default(),
            "posting LinkedIn share"
        );

        let response = self.post(token, &Share::comment(comment)).await?;

        let mut receipt = PublishReceipt::new(MODULE_ID);
        if let Some(update_url) = response["updateUrl"].as_str() {
            receipt = receipt.with_reference(update_url);
        }
        Ok(receipt.with_response(response))
    }

    fn configurator(&self) -> Option<&dyn ChannelConfigurator> {
        Some(self)
    }
}

impl ChannelConfigurator for LinkedInPlugin {
    fn configure(
        &self,
        channel_id: &str,
        channel: &Channel,
        config_fields: &[ConfigField],
    ) -> Result<ConfigureView> {
        let request = self.authorization_request(channel_id)?;
        debug!(channel_id, state = %request.state, "rendering LinkedIn configuration");
        Ok(ConfigureView {
            template: CONFIGURATION_TEMPLATE,
            channel: channel.clone(),
            config_fields: config_fields.to_vec(),
            redirect: request.url,
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, superform_publishing::ErrorKind};

    fn plugin() -> LinkedInPlugin {
        LinkedInPlugin::new(
            Credentials::new("client-123", "secret"),
            LinkedInSettings {
                api_base: "http://127.0.0.1:1".into(),
                token_url: "http://127.0.0.1:1/token".into(),
                ..LinkedInSettings::default()
            },
            reqwest::Client::new(),
        )
    }

    #[test]
    fn static_field_lists() {
        let plugin = plugin();
        assert_eq!(plugin.fields_unavailable(), &["Title", "Description"]);
        assert!(plugin.config_fields().is_empty());
    }

    #[test]
    fn configure_builds_redirect_with_state() {
        let plugin = plugin();
        let channel = Channel {
            id: "9".into(),
            name: "Company page".into(),
            module: MODULE_ID.into(),
            config: "{}".into(),
        };
        let fields = vec![ConfigField::new("token")];

        let view = plugin.configure("9", &channel, &fields).unwrap();
        assert_eq!(view.template, "linkedin_configuration.html");
        assert_eq!(view.channel, channel);
        assert_eq!(view.config_fields, fields);

        let url = url::Url::parse(&view.redirect).unwrap();
        let state = url
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(state.starts_with("id_9rest_"));
        assert_eq!(superform_oauth::parse_state(&state), Some("9"));
    }

    #[test]
    fn placeholder_client_id_still_renders() {
        let plugin = LinkedInPlugin::new(
            Credentials::placeholder(),
            LinkedInSettings::default(),
            reqwest::Client::new(),
        );
        let request = plugin.authorization_request("1").unwrap();
        assert!(request.url.contains("client_id=no+client+id"));
    }

    #[tokio::test]
    async fn run_without_token_is_missing_key() {
        let err = plugin()
            .run(&Publication::new("T", "B"), r#"{"username":"x"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn invalid_authorize_url_is_a_settings_error() {
        let plugin = LinkedInPlugin::new(
            Credentials::new("client-123", "secret"),
            LinkedInSettings {
                authorize_url: "not a url".into(),
                ..LinkedInSettings::default()
            },
            reqwest::Client::new(),
        );
        let err = plugin.authorization_request("1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSettings);
        assert!(!err.is_retryable());
    }

    #[test]
    fn channel_config_ignores_extra_keys_of_any_type() {
        let config =
            LinkedInChannelConfig::from_json(r#"{"token":"t","expires_in":5183999}"#).unwrap();
        assert_eq!(config.require_token().unwrap(), "t");

        let config = LinkedInChannelConfig::from_json(r#"{"expires_in":5183999}"#).unwrap();
        assert_eq!(config.require_token().unwrap_err().kind(), ErrorKind::MissingKey);
    }

    #[tokio::test]
    async fn run_with_malformed_config_is_decode_error() {
        let err = plugin()
            .run(&Publication::new("T", "B"), "not json")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigDecode);
    }
}
