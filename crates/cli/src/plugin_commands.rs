use {
    anyhow::{Context, Result},
    secrecy::ExposeSecret,
    std::{path::Path, sync::Arc},
    superform_config::SuperformSettings,
    superform_linkedin::{Credentials, CredentialsFile, LinkedInPlugin},
    superform_publishing::{
        Channel, ConfigField, PluginRegistry, Publication, http::build_client,
    },
    superform_wiki::WikiPlugin,
};

/// Registered plugins, plus direct access to LinkedIn for the code exchange.
pub struct Plugins {
    pub registry: PluginRegistry,
    pub linkedin: Arc<LinkedInPlugin>,
}

impl Plugins {
    pub fn from_settings(settings: &SuperformSettings) -> Result<Self> {
        let http = build_client(settings.http.timeout())?;
        let credentials = Credentials::load_or_placeholder(&CredentialsFile::new(
            &settings.linkedin.credentials_dir,
        ));

        let linkedin = Arc::new(LinkedInPlugin::new(
            credentials,
            settings.linkedin.clone(),
            http.clone(),
        ));

        let mut registry = PluginRegistry::new();
        registry.register(Box::new(Arc::clone(&linkedin)));
        registry.register(Box::new(WikiPlugin::new(settings.wiki.clone(), http)));

        Ok(Self { registry, linkedin })
    }
}

pub fn list(plugins: &Plugins) -> Result<()> {
    let entries: Vec<_> = plugins
        .registry
        .list()
        .into_iter()
        .filter_map(|id| plugins.registry.get(id))
        .map(|p| {
            serde_json::json!({
                "id": p.id(),
                "name": p.name(),
                "fields_unavailable": p.fields_unavailable(),
                "config_fields": p.config_fields(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

pub fn configure(
    plugins: &Plugins,
    module: &str,
    channel_id: &str,
    channel_name: &str,
) -> Result<()> {
    let plugin = plugins
        .registry
        .get(module)
        .with_context(|| format!("unknown plugin: {module}"))?;
    let channel = Channel {
        id: channel_id.to_string(),
        name: channel_name.to_string(),
        module: module.to_string(),
        config: "{}".into(),
    };
    let fields: Vec<ConfigField> = plugin
        .config_fields()
        .iter()
        .map(|name| ConfigField::new(*name))
        .collect();

    let view = plugins
        .registry
        .configure(module, channel_id, &channel, &fields)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub async fn exchange_code(plugins: &Plugins, code: &str) -> Result<()> {
    let token = plugins.linkedin.exchange_code_for_token(code).await?;
    let out = serde_json::json!({
        "token": token.access_token.expose_secret(),
        "expires_in": token.expires_in,
    });
    println!("{out}");
    Ok(())
}

/// Returns whether the plugin reported success. Plugin failures are printed
/// as JSON rather than propagated.
pub async fn publish(
    plugins: &Plugins,
    module: &str,
    publication: &Path,
    channel_config: &str,
) -> Result<bool> {
    let raw = std::fs::read_to_string(publication)
        .with_context(|| format!("failed to read {}", publication.display()))?;
    let publication: Publication =
        serde_json::from_str(&raw).context("publication file is not valid JSON")?;

    match plugins
        .registry
        .publish(module, &publication, channel_config)
        .await
    {
        Ok(receipt) => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            Ok(true)
        },
        Err(e) => {
            let out = serde_json::json!({
                "error": e.kind(),
                "message": e.to_string(),
                "retryable": e.is_retryable(),
            });
            println!("{out}");
            Ok(false)
        },
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn plugins() -> Plugins {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = SuperformSettings::default();
        settings.linkedin.credentials_dir = dir.path().join("missing");
        Plugins::from_settings(&settings).unwrap()
    }

    #[test]
    fn registers_both_plugins() {
        let plugins = plugins();
        assert_eq!(plugins.registry.list(), vec!["linkedin", "wiki"]);
    }

    #[test]
    fn wiki_has_no_configure_view() {
        let plugins = plugins();
        assert!(configure(&plugins, "wiki", "1", "Wiki").is_err());
        assert!(configure(&plugins, "linkedin", "1", "Page").is_ok());
    }

    #[tokio::test]
    async fn publish_failure_reports_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("publication.json");
        std::fs::write(&path, r#"{"title":"T","description":"B"}"#).unwrap();

        let published = publish(&plugins(), "wiki", &path, "not json")
            .await
            .unwrap();
        assert!(!published);
    }

    #[tokio::test]
    async fn unreadable_publication_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = publish(&plugins(), "wiki", &dir.path().join("nope.json"), "{}").await;
        assert!(result.is_err());
    }
}
