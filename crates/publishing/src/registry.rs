use std::collections::HashMap;

use tracing::{info, warn};

use crate::{
    Error, Result,
    plugin::{ConfigureView, PublishPlugin, PublishReceipt},
    publication::{Channel, ConfigField, Publication},
};

/// Registry of all loaded publishing plugins, keyed by module id.
pub struct PluginRegistry {
    plugins: HashMap<String, Box<dyn PublishPlugin>>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    pub fn register(&mut self, plugin: Box<dyn PublishPlugin>) {
        self.plugins.insert(plugin.id().to_string(), plugin);
    }

    pub fn get(&self, module: &str) -> Option<&dyn PublishPlugin> {
        self.plugins.get(module).map(|p| p.as_ref())
    }

    /// Registered module ids, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.plugins.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    fn require(&self, module: &str) -> Result<&dyn PublishPlugin> {
        self.get(module).ok_or_else(|| Error::UnknownPlugin {
            module: module.to_string(),
        })
    }

    /// Run the plugin registered for `module` and log the outcome.
    pub async fn publish(
        &self,
        module: &str,
        publication: &Publication,
        channel_config: &str,
    ) -> Result<PublishReceipt> {
        let plugin = self.require(module)?;
        match plugin.run(publication, channel_config).await {
            Ok(receipt) => {
                info!(
                    module,
                    title = %publication.title,
                    reference = receipt.reference.as_deref().unwrap_or(""),
                    "publication posted"
                );
                Ok(receipt)
            },
            Err(e) => {
                warn!(
                    module,
                    title = %publication.title,
                    kind = %e.kind(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "publication failed"
                );
                Err(e)
            },
        }
    }

    pub fn configure(
        &self,
        module: &str,
        channel_id: &str,
        channel: &Channel,
        config_fields: &[ConfigField],
    ) -> Result<ConfigureView> {
        let configurator = self
            .require(module)?
            .configurator()
            .ok_or_else(|| Error::Unsupported {
                module: module.to_string(),
                operation: "configure",
            })?;
        configurator.configure(channel_id, channel, config_fields)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{ErrorKind, plugin::ChannelConfigurator},
        async_trait::async_trait,
    };

    struct EchoPlugin;

    #[async_trait]
    impl PublishPlugin for EchoPlugin {
        fn id(&self) -> &str {
            "echo"
        }

        fn name(&self) -> &str {
            "Echo"
        }

        async fn run(
            &self,
            publication: &Publication,
            channel_config: &str,
        ) -> Result<PublishReceipt> {
            crate::ChannelConfig::from_json(channel_config)?.require("target")?;
            Ok(PublishReceipt::new("echo").with_reference(publication.title.clone()))
        }
    }

    struct SetupPlugin;

    impl ChannelConfigurator for SetupPlugin {
        fn configure(
            &self,
            channel_id: &str,
            channel: &Channel,
            config_fields: &[ConfigField],
        ) -> Result<ConfigureView> {
            Ok(ConfigureView {
                template: "setup.html",
                channel: channel.clone(),
                config_fields: config_fields.to_vec(),
                redirect: format!("https://example.com/{channel_id}"),
            })
        }
    }

    #[async_trait]
    impl PublishPlugin for SetupPlugin {
        fn id(&self) -> &str {
            "setup"
        }

        fn name(&self) -> &str {
            "Setup"
        }

        async fn run(&self, _: &Publication, _: &str) -> Result<PublishReceipt> {
            Ok(PublishReceipt::new("setup"))
        }

        fn configurator(&self) -> Option<&dyn ChannelConfigurator> {
            Some(self)
        }
    }

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register(Box::new(SetupPlugin));
        registry.register(Box::new(EchoPlugin));
        registry
    }

    #[test]
    fn list_is_sorted() {
        assert_eq!(registry().list(), vec!["echo", "setup"]);
    }

    #[tokio::test]
    async fn publish_dispatches_to_plugin() {
        let receipt = registry()
            .publish("echo", &Publication::new("Hi", ""), r#"{"target":"x"}"#)
            .await
            .unwrap();
        assert_eq!(receipt.reference.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn publish_surfaces_plugin_error() {
        let err = registry()
            .publish("echo", &Publication::new("Hi", ""), "{}")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
    }

    #[tokio::test]
    async fn publish_unknown_module() {
        let err = registry()
            .publish("nope", &Publication::new("Hi", ""), "{}")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownPlugin);
    }

    #[tokio::test]
    async fn shared_plugin_stays_usable_outside_registry() {
        let shared = std::sync::Arc::new(SetupPlugin);
        let mut registry = PluginRegistry::new();
        registry.register(Box::new(std::sync::Arc::clone(&shared)));

        assert_eq!(shared.id(), "setup");
        assert!(registry.get("setup").unwrap().configurator().is_some());
        registry
            .publish("setup", &Publication::new("Hi", ""), "{}")
            .await
            .unwrap();
    }

    #[test]
    fn configure_requires_configurator() {
        let registry = registry();
        let channel = Channel::default();

        let view = registry.configure("setup", "7", &channel, &[]).unwrap();
        assert_eq!(view.redirect, "https://example.com/7");

        let err = registry.configure("echo", "7", &channel, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}
