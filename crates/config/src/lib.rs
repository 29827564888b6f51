//! Settings loading for the Superform publishing plugins.
//!
//! Config files: `superform.toml`, `superform.yaml`, or `superform.json`
//! Searched in `./` then `~/.config/superform/`.
//!
//! `SUPERFORM_*` environment variables override individual fields.

pub mod loader;
pub mod schema;

pub use {
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config, load_or_default},
    schema::{HttpSettings, LinkedInSettings, SuperformSettings, WikiSettings},
};
