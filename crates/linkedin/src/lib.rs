//! LinkedIn publishing plugin.
//!
//! The configuration page sends the member through LinkedIn's authorization
//! redirect; the callback code is exchanged for an access token the host
//! stores on the channel as `token`. Publishing posts the publication as a
//! comment-only share visible to anyone.

pub mod api;
pub mod auth;
pub mod credentials;
pub mod format;
pub mod plugin;

pub use {
    api::{LinkedInApplication, Share, ShareContent, Visibility},
    auth::Permission,
    credentials::{Credentials, CredentialsFile},
    format::format_comment,
    plugin::{LinkedInChannelConfig, LinkedInPlugin},
};
