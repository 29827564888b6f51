use {async_trait::async_trait, serde::Serialize};

use crate::{
    Result,
    publication::{Channel, ConfigField, Publication},
};

/// Core publishing plugin trait. Each external service implements this.
#[async_trait]
pub trait PublishPlugin: Send + Sync {
    /// Module identifier the host stores on its channels (e.g. "linkedin").
    fn id(&self) -> &str;

    /// Human-readable plugin name.
    fn name(&self) -> &str;

    /// Publication fields the host should hide for channels of this module.
    fn fields_unavailable(&self) -> &'static [&'static str] {
        &[]
    }

    /// Extra channel configuration keys the host should ask for.
    fn config_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Push `publication` to the service using the channel's stored config.
    async fn run(&self, publication: &Publication, channel_config: &str)
    -> Result<PublishReceipt>;

    /// Configuration stage, for plugins that need a setup page.
    fn configurator(&self) -> Option<&dyn ChannelConfigurator> {
        None
    }
}

#[async_trait]
impl<P: PublishPlugin + ?Sized> PublishPlugin for std::sync::Arc<P> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn fields_unavailable(&self) -> &'static [&'static str] {
        (**self).fields_unavailable()
    }

    fn config_fields(&self) -> &'static [&'static str] {
        (**self).config_fields()
    }

    async fn run(
        &self,
        publication: &Publication,
        channel_config: &str,
    ) -> Result<PublishReceipt> {
        (**self).run(publication, channel_config).await
    }

    fn configurator(&self) -> Option<&dyn ChannelConfigurator> {
        (**self).configurator()
    }
}

/// Produces the data for a plugin's channel setup page.
pub trait ChannelConfigurator: Send + Sync {
    fn configure(
        &self,
        channel_id: &str,
        channel: &Channel,
        config_fields: &[ConfigField],
    ) -> Result<ConfigureView>;
}

/// Render payload handed to the host's template engine.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureView {
    pub template: &'static str,
    pub channel: Channel,
    pub config_fields: Vec<ConfigField>,
    pub redirect: String,
}

/// What a successful publish reports back to the host.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReceipt {
    pub plugin: String,
    /// Where the published item can be found, when the service says so.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Raw provider response, when the service returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

impl PublishReceipt {
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            reference: None,
            response: None,
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    #[must_use]
    pub fn with_response(mut self, response: serde_json::Value) -> Self {
        self.response = Some(response);
        self
    }
}
