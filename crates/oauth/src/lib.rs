//! OAuth 2.0 authorization-code primitives for publishing plugins.
//!
//! Builds the provider redirect with a channel-scoped state value and trades
//! the returned code for an [`AccessToken`]. Tokens are not stored here; the
//! host keeps them in the channel configuration.

pub mod error;
pub mod flow;
pub mod state;
pub mod types;

pub use {
    error::{Error, Result},
    flow::{AuthorizationRequest, OAuthFlow},
    state::{generate_state, parse_state, random_suffix},
    types::{AccessToken, OAuthConfig, UNKNOWN_EXPIRY_SECS, serialize_secret},
};
