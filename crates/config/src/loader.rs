use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::schema::SuperformSettings;

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "superform.toml",
    "superform.yaml",
    "superform.yml",
    "superform.json",
];

/// Load settings from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<SuperformSettings> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_config(&raw, path)
}

/// Discover and load settings from standard locations, then apply
/// environment overrides.
///
/// Search order:
/// 1. `./superform.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/superform/superform.{toml,yaml,yml,json}` (user-global)
///
/// Falls back to `SuperformSettings::default()` if no file is found or the
/// file cannot be parsed.
pub fn discover_and_load() -> SuperformSettings {
    let mut settings = match find_config_file() {
        Some(path) => load_or_default(&path),
        None => {
            debug!("no config file found, using defaults");
            SuperformSettings::default()
        },
    };
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

/// Load `path`, logging and falling back to defaults on failure.
pub fn load_or_default(path: &Path) -> SuperformSettings {
    debug!(path = %path.display(), "loading config");
    match load_config(path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            SuperformSettings::default()
        },
    }
}

/// Override individual fields from `SUPERFORM_*` variables.
///
/// `lookup` is injected so callers (and tests) control the environment source.
pub fn apply_env_overrides<F>(settings: &mut SuperformSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("SUPERFORM_HTTP_TIMEOUT_SECS") {
        match v.parse() {
            Ok(secs) => settings.http.timeout_secs = secs,
            Err(e) => warn!(value = %v, error = %e, "ignoring invalid SUPERFORM_HTTP_TIMEOUT_SECS"),
        }
    }
    if let Some(v) = lookup("SUPERFORM_LINKEDIN_CREDENTIALS_DIR") {
        settings.linkedin.credentials_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("SUPERFORM_LINKEDIN_REDIRECT_URI") {
        settings.linkedin.redirect_uri = v;
    }
    if let Some(v) = lookup("SUPERFORM_WIKI_URL") {
        settings.wiki.url = v;
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let config_dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| config_dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/superform/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "superform").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<SuperformSettings> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
