use {
    async_trait::async_trait,
    secrecy::ExposeSecret,
    superform_config::WikiSettings,
    superform_publishing::{Error, PublishPlugin, PublishReceipt, Publication, Result},
    tracing::{debug, info, warn},
    url::Url,
};

use crate::{
    config::WikiChannelConfig,
    format::{make_text_now, page_name},
};

pub const MODULE_ID: &str = "wiki";
pub const FIELDS_UNAVAILABLE: &[&str] = &[];
pub const CONFIG_FIELDS: &[&str] = &["username", "password"];

/// Marker PmWiki prints when another edit landed after `basetime`.
const EDIT_CONFLICT_MARKER: &str = "modified since you started editing";

/// What a 2xx edit response actually means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    Conflict,
    PasswordPrompt,
}

/// Inspect the page PmWiki returned for an edit post.
pub fn classify_response(body: &str) -> EditOutcome {
    if body.contains(EDIT_CONFLICT_MARKER) {
        EditOutcome::Conflict
    } else if body.contains("name='authpw'") || body.contains("name=\"authpw\"") {
        EditOutcome::PasswordPrompt
    } else {
        EditOutcome::Saved
    }
}

/// Link to `page` on the wiki at `wiki_url`, with the page name query-encoded.
pub fn page_reference(wiki_url: &str, page: &str) -> Result<String> {
    let mut url = Url::parse(wiki_url)
        .map_err(|e| Error::invalid_settings(format!("wiki url {wiki_url}: {e}")))?;
    url.query_pairs_mut().append_pair("n", page);
    Ok(url.to_string())
}

/// Publishes publications as PmWiki pages.
pub struct WikiPlugin {
    settings: WikiSettings,
    http: reqwest::Client,
}

impl WikiPlugin {
    pub fn new(settings: WikiSettings, http: reqwest::Client) -> Self {
        Self { settings, http }
    }

    pub fn url(&self) -> &str {
        &self.settings.url
    }

    async fn post_edit(&self, page: &str, text: &str, config: &WikiChannelConfig) -> Result<()> {
        let basetime = chrono::Utc::now().timestamp().to_string();
        let form = [
            ("n", page),
            ("text", text),
            ("action", "edit"),
            ("post", "1"),
            ("authid", config.username.as_str()),
            ("authpw", config.password.expose_secret().as_str()),
            ("basetime", basetime.as_str()),
        ];

        let resp = self
            .http
            .post(&self.settings.url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::http("posting wiki edit", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::http("reading wiki edit response", e))?;
        if !status.is_success() {
            return Err(Error::submission(
                Some(status.as_u16()),
                format!("wiki edit of {page} failed"),
            ));
        }

        match classify_response(&body) {
            EditOutcome::Saved => Ok(()),
            EditOutcome::Conflict => Err(Error::EditConflict { page: page.into() }),
            EditOutcome::PasswordPrompt => Err(Error::AuthRejected { page: page.into() }),
        }
    }
}

#[async_trait]
impl PublishPlugin for WikiPlugin {
    fn id(&self) -> &str {
        MODULE_ID
    }

    fn name(&self) -> &str {
        "PmWiki"
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
        let config = WikiChannelConfig::from_json(channel_config).inspect_err(|e| {
            warn!(error = %e, "wiki channel config is unusable");
        })?;

        let page = page_name(&self.settings.page_group, &publication.title);
        let reference = page_reference(&self.settings.url, &page)?;
        let text = make_text_now(publication);
        debug!(page = %page, len = text.len(), "writing wiki page");

        self.post_edit(&page, &text, &config).await?;

        info!(page = %page, "wiki page saved");
        Ok(PublishReceipt::new(MODULE_ID).with_reference(reference))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, superform_publishing::ErrorKind};

    #[test]
    fn saved_page_is_success() {
        assert_eq!(
            classify_response("<html><h1>News.Launch</h1></html>"),
            EditOutcome::Saved
        );
        assert_eq!(classify_response(""), EditOutcome::Saved);
    }

    #[test]
    fn conflict_marker_wins() {
        let body = "The page you are editing has been modified since you started editing it.";
        assert_eq!(classify_response(body), EditOutcome::Conflict);
    }

    #[test]
    fn password_form_in_either_quote_style() {
        assert_eq!(
            classify_response("<input type='password' name='authpw' value='' />"),
            EditOutcome::PasswordPrompt
        );
        assert_eq!(
            classify_response(r#"<input type="password" name="authpw">"#),
            EditOutcome::PasswordPrompt
        );
    }

    #[test]
    fn reference_encodes_page_name() {
        let reference =
            page_reference("http://localhost/pmwiki.php", "News.Q&A#1?").unwrap();
        assert_eq!(reference, "http://localhost/pmwiki.php?n=News.Q%26A%231%3F");
    }

    #[test]
    fn reference_rejects_unparsable_wiki_url() {
        let err = page_reference("not a url", "News.T").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSettings);
    }

    #[test]
    fn exposes_config_fields() {
        let plugin = WikiPlugin::new(WikiSettings::default(), reqwest::Client::new());
        assert_eq!(plugin.config_fields(), &["username", "password"]);
        assert!(plugin.fields_unavailable().is_empty());
        assert!(plugin.configurator().is_none());
    }
}
