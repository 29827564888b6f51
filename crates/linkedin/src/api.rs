use {
    secrecy::ExposeSecret,
    serde::Serialize,
    superform_oauth::AccessToken,
    superform_publishing::{Error, Result},
    tracing::debug,
};

/// Share visibility understood by the share API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Anyone,
    ConnectionsOnly,
}

#[derive(Debug, Clone, Serialize)]
struct VisibilityCode {
    code: Visibility,
}

/// Optional link/image attachment of a share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "submitted-url", skip_serializing_if = "Option::is_none")]
    pub submitted_url: Option<String>,
    #[serde(rename = "submitted-image-url", skip_serializing_if = "Option::is_none")]
    pub submitted_image_url: Option<String>,
}

impl ShareContent {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.submitted_url.is_none()
            && self.submitted_image_url.is_none()
    }
}

/// A share submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub comment: String,
    pub content: ShareContent,
    pub visibility: Visibility,
}

impl Share {
    /// Comment-only share visible to anyone.
    pub fn comment(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            content: ShareContent::default(),
            visibility: Visibility::Anyone,
        }
    }

    /// Request body for the share endpoint. `content` is only sent when at
    /// least one of its fields is set.
    pub fn payload(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "comment": self.comment,
            "visibility": VisibilityCode { code: self.visibility },
        });
        if !self.content.is_empty()
            && let Some(obj) = body.as_object_mut()
        {
            obj.insert(
                "content".into(),
                serde_json::to_value(&self.content).unwrap_or_default(),
            );
        }
        body
    }
}

/// Authenticated client for the LinkedIn member REST API.
pub struct LinkedInApplication {
    http: reqwest::Client,
    api_base: String,
    token: AccessToken,
}

impl LinkedInApplication {
    pub fn new(http: reqwest::Client, api_base: impl Into<String>, token: AccessToken) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.trim_end_matches('/'))
    }

    /// Fetch the authenticated member's profile.
    pub async fn get_profile(&self) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(self.url("/v1/people/~"))
            .query(&[("format", "json")])
            .bearer_auth(self.token.access_token.expose_secret())
            .header("x-li-format", "json")
            .send()
            .await
            .map_err(|e| Error::http("fetching LinkedIn profile", e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::submission(
                Some(status.as_u16()),
                format!("profile request failed: {}", api_error_message(&body)),
            ));
        }
        resp.json()
            .await
            .map_err(|e| Error::http("decoding LinkedIn profile", e))
    }

    /// Post a share and return the provider's response.
    pub async fn submit_share(&self, share: &Share) -> Result<serde_json::Value> {
        let resp = self
            .http
            .post(self.url("/v1/people/~/shares"))
            .bearer_auth(self.token.access_token.expose_secret())
            .header("x-li-format", "json")
            .json(&share.payload())
            .send()
            .await
            .map_err(|e| Error::http("submitting LinkedIn share", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::http("reading LinkedIn share response", e))?;
        if !status.is_success() {
            return Err(Error::submission(
                Some(status.as_u16()),
                api_error_message(&body),
            ));
        }

        debug!(status = status.as_u16(), "share accepted");
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| Error::submission(Some(status.as_u16()), format!("invalid response: {e}")))
    }
}

/// Extract the `message` field of a LinkedIn error body, falling back to the
/// raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
