use {
    serde::{Deserialize, Serialize},
    std::{path::PathBuf, time::Duration},
};

/// Root settings for the publishing plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperformSettings {
    pub http: HttpSettings,
    pub linkedin: LinkedInSettings,
    pub wiki: WikiSettings,
}

/// Outbound HTTP behavior shared by all plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Upper bound for any single outbound request.
    pub timeout_secs: u64,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// LinkedIn plugin endpoints and credential location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInSettings {
    /// Directory holding `linkedin.ini`.
    pub credentials_dir: PathBuf,
    /// Callback the provider redirects to after authorization.
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
    /// Base URL of the share/profile REST API.
    pub api_base: String,
}

impl Default for LinkedInSettings {
    fn default() -> Self {
        Self {
            credentials_dir: PathBuf::from("superform/plugins"),
            redirect_uri: "http://localhost:5000/configure/linkedin".into(),
            authorize_url: "https://www.linkedin.com/oauth/v2/authorization".into(),
            token_url: "https://www.linkedin.com/oauth/v2/accessToken".into(),
            api_base: "https://api.linkedin.com".into(),
        }
    }
}

/// Wiki plugin endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiSettings {
    /// PmWiki entry script that accepts `action=edit` posts.
    pub url: String,
    /// Wiki group pages are created in.
    pub page_group: String,
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost/pmwiki-2.2.109/pmwiki.php".into(),
            page_group: "News".into(),
        }
    }
}
