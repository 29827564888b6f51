//! Publishing plugin contract shared by every Superform service plugin.
//!
//! A plugin receives a [`Publication`] and the channel's stored JSON config and
//! pushes the content to one external service. Plugins that need a setup page
//! also implement [`ChannelConfigurator`]. Failures are reported as typed
//! [`Error`]s carrying an [`ErrorKind`].

pub mod error;
pub mod http;
pub mod plugin;
pub mod publication;
pub mod registry;

pub use {
    error::{Error, ErrorKind, Result},
    plugin::{ChannelConfigurator, ConfigureView, PublishPlugin, PublishReceipt},
    publication::{Channel, ChannelConfig, ConfigField, DEFAULT_AUTHOR, Publication},
    registry::PluginRegistry,
};
