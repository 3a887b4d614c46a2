//! Credential and client configuration
//!
//! Each credential is read from its environment variable first, then from a
//! TOML file:
//!
//! ```toml
//! consumer_key = "..."
//! consumer_secret = "..."
//! token_key = "..."
//! token_secret = "..."
//! # optional
//! base_url = "https://api.bricklink.com/api/store/v1"
//! request_delay_ms = 100
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::bricklink::{DEFAULT_BASE_URL, DEFAULT_REQUEST_DELAY};
use crate::error::{Error, Result};

pub const ENV_CONSUMER_KEY: &str = "BRICKLINK_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "BRICKLINK_CONSUMER_SECRET";
pub const ENV_TOKEN_KEY: &str = "BRICKLINK_TOKEN_KEY";
pub const ENV_TOKEN_SECRET: &str = "BRICKLINK_TOKEN_SECRET";

/// Config file looked up in the working directory when `--config` is not given
pub const LOCAL_CONFIG_FILE: &str = "bricklink.toml";

/// The four OAuth 1.0a credentials issued by BrickLink.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_key: String,
    pub token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &mask(&self.consumer_key))
            .field("consumer_secret", &mask(&self.consumer_secret))
            .field("token_key", &mask(&self.token_key))
            .field("token_secret", &mask(&self.token_secret))
            .finish()
    }
}

/// Shows the first and last characters of a secret for debug output.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Contents of the optional TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub token_key: Option<String>,
    pub token_secret: Option<String>,
    pub base_url: Option<String>,
    pub request_delay_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }
}

/// Fully resolved settings for the BrickLink client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub base_url: String,
    pub request_delay: Duration,
}

impl Settings {
    /// Resolves settings from the process environment and the config file.
    ///
    /// An explicitly given `config_path` must exist; the default locations are
    /// only read when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(FileConfig::load(path)?),
            None => match default_config_path() {
                Some(path) => {
                    log::debug!("Using config file {}", path.display());
                    Some(FileConfig::load(&path)?)
                }
                None => None,
            },
        };
        Self::resolve(file.unwrap_or_default(), |name| std::env::var(name).ok())
    }

    /// Merges environment values over file values. Blank values count as missing.
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut pick = |name: &'static str, from_file: Option<String>| -> String {
            let value = env(name)
                .filter(|v| !v.trim().is_empty())
                .or(from_file.filter(|v| !v.trim().is_empty()));
            match value {
                Some(v) => v.trim().to_string(),
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let credentials = Credentials {
            consumer_key: pick(ENV_CONSUMER_KEY, file.consumer_key),
            consumer_secret: pick(ENV_CONSUMER_SECRET, file.consumer_secret),
            token_key: pick(ENV_TOKEN_KEY, file.token_key),
            token_secret: pick(ENV_TOKEN_SECRET, file.token_secret),
        };

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "Missing BrickLink API credentials: {}. Run with --setup for instructions.",
                missing.join(", ")
            )));
        }

        Ok(Self {
            credentials,
            base_url: file
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_delay: file
                .request_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_REQUEST_DELAY),
        })
    }
}

/// Returns the first existing default config file, if any.
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("bricklink_pricer").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Instructions printed by `--setup`.
pub fn setup_instructions() -> String {
    let rule = "=".repeat(60);
    let user_config = dirs::config_dir()
        .map(|dir| dir.join("bricklink_pricer").join("config.toml"))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<config dir>/bricklink_pricer/config.toml".to_string());

    format!(
        "{rule}
SETUP REQUIRED: BrickLink API Credentials
{rule}
1. Go to: https://www.bricklink.com/v2/api/register_consumer.page
2. Register your application and get 4 credentials
3. Export them as environment variables:

   {ENV_CONSUMER_KEY}=your_consumer_key
   {ENV_CONSUMER_SECRET}=your_consumer_secret
   {ENV_TOKEN_KEY}=your_token_value
   {ENV_TOKEN_SECRET}=your_token_secret

   or put them in {LOCAL_CONFIG_FILE} (or {user_config}):

   consumer_key = \"your_consumer_key\"
   consumer_secret = \"your_consumer_secret\"
   token_key = \"your_token_value\"
   token_secret = \"your_token_secret\"
{rule}"
    )
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
