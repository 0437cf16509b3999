//! Application configuration for docbot.
//!
//! User config lives at `~/.docbot/docbot.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DocbotError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docbot.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docbot";

// ---------------------------------------------------------------------------
// Config structs (matching docbot.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Manual lookup settings.
    #[serde(default)]
    pub lookup: LookupSection,
}

/// `[lookup]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSection {
    /// Site root; the lookup endpoint and manual pages live under it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the English manual below the site root.
    #[serde(default = "default_manual_path")]
    pub manual_path: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for LookupSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            manual_path: default_manual_path(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://php.net".into()
}
fn default_manual_path() -> String {
    "/manual/en".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_redirects() -> usize {
    5
}
fn default_user_agent() -> String {
    concat!("docbot/", env!("CARGO_PKG_VERSION")).into()
}

// ---------------------------------------------------------------------------
// Lookup config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime lookup configuration, merged from the config file and CLI flags.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Site root, without a trailing slash.
    pub base_url: String,
    /// Manual path below the site root, with a leading slash.
    pub manual_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: usize,
    /// User-Agent header value.
    pub user_agent: String,
}

impl LookupConfig {
    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            DocbotError::config(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(DocbotError::config(format!(
                    "base_url must be http or https, got '{other}'"
                )));
            }
        }
        if !self.manual_path.starts_with('/') {
            return Err(DocbotError::config(format!(
                "manual_path must start with '/', got '{}'",
                self.manual_path
            )));
        }
        Ok(())
    }

    /// Root of the English manual, e.g. `http://php.net/manual/en`.
    pub fn manual_base(&self) -> String {
        format!("{}{}", self.base_url, self.manual_path.trim_end_matches('/'))
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for LookupConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.lookup.base_url.trim_end_matches('/').to_string(),
            manual_path: config.lookup.manual_path.clone(),
            timeout_secs: config.lookup.timeout_secs,
            max_redirects: config.lookup.max_redirects,
            user_agent: config.lookup.user_agent.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docbot/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| DocbotError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docbot/docbot.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocbotError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocbotError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocbotError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocbotError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocbotError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
