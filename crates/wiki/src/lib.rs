//! PmWiki publishing plugin.
//!
//! Each publication becomes a page in the configured group, written through
//! the wiki's `action=edit` form with the channel's edit password.

pub mod config;
pub mod format;
pub mod plugin;

pub use {
    config::WikiChannelConfig,
    format::{make_text, make_text_now, page_name},
    plugin::WikiPlugin,
};
