use {
    superform_config::LinkedInSettings,
    superform_oauth::{OAuthConfig, OAuthFlow},
};

use crate::credentials::Credentials;

/// Member permissions a LinkedIn application can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    BasicProfile,
    EmailAddress,
    Share,
    CompanyAdmin,
}

impl Permission {
    /// The full default permission set.
    pub const ALL: [Permission; 4] = [
        Self::BasicProfile,
        Self::EmailAddress,
        Self::Share,
        Self::CompanyAdmin,
    ];

    pub fn scope(self) -> &'static str {
        match self {
            Self::BasicProfile => "r_basicprofile",
            Self::EmailAddress => "r_emailaddress",
            Self::Share => "w_share",
            Self::CompanyAdmin => "rw_company_admin",
        }
    }
}

/// Build the authentication context for the LinkedIn authorization-code
/// flow from the application credentials and configured endpoints.
pub fn authentication_config(credentials: &Credentials, settings: &LinkedInSettings) -> OAuthConfig {
    OAuthConfig {
        client_id: credentials.client_id.clone(),
        client_secret: credentials.client_secret.clone(),
        auth_url: settings.authorize_url.clone(),
        token_url: settings.token_url.clone(),
        redirect_uri: settings.redirect_uri.clone(),
        scopes: Permission::ALL
            .iter()
            .map(|p| p.scope().to_string())
            .collect(),
    }
}

pub fn authentication(
    credentials: &Credentials,
    settings: &LinkedInSettings,
    client: reqwest::Client,
) -> OAuthFlow {
    OAuthFlow::new(authentication_config(credentials, settings), client)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, secrecy::ExposeSecret};

    #[test]
    fn config_requests_every_permission() {
        let config = authentication_config(
            &Credentials::new("id", "secret"),
            &LinkedInSettings::default(),
        );
        assert_eq!(config.scopes, vec![
            "r_basicprofile",
            "r_emailaddress",
            "w_share",
            "rw_company_admin"
        ]);
        assert_eq!(config.client_secret.expose_secret(), "secret");
        assert_eq!(config.redirect_uri, "http://localhost:5000/configure/linkedin");
    }
}
