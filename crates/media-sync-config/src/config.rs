use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use crate::credentials::CredentialStore;

pub const DEFAULT_IMDB_BASE_URL: &str = "https://www.imdb.com";

/// Marker value asking for the user id to be scraped from the profile page
pub const USER_ID_SCRAPE: &str = "scrape";

pub const ENV_COOKIE_AT_MAIN: &str = "IMDB_COOKIE_AT_MAIN";
pub const ENV_COOKIE_UBID_MAIN: &str = "IMDB_COOKIE_UBID_MAIN";
pub const ENV_USER_ID: &str = "IMDB_USER_ID";
pub const ENV_WATCHLIST_ID: &str = "IMDB_WATCHLIST_ID";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub imdb: ImdbConfig,
    #[serde(default)]
    pub export: ExportOptions,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImdbConfig {
    /// Account id (ur...). Absent, empty or "scrape" means discover it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Watchlist id (ls...). Re-resolved on every connect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchlist_id: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportOptions {
    #[serde(default = "default_true")]
    pub watchlist: bool,
    #[serde(default = "default_true")]
    pub lists: bool,
    #[serde(default = "default_true")]
    pub ratings: bool,
}

/// Everything needed to build an IMDb client, after merging config file,
/// credentials file and environment.
#[derive(Clone)]
pub struct ImdbSettings {
    pub cookie_at_main: String,
    pub cookie_ubid_main: String,
    pub user_id: Option<String>,
    pub watchlist_id: Option<String>,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for ImdbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImdbSettings")
            .field("cookie_at_main", &mask_secret(&self.cookie_at_main))
            .field("cookie_ubid_main", &mask_secret(&self.cookie_ubid_main))
            .field("user_id", &self.user_id)
            .field("watchlist_id", &self.watchlist_id)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_IMDB_BASE_URL.to_string()
}

impl Default for ImdbConfig {
    fn default() -> Self {
        Self {
            user_id: Some(USER_ID_SCRAPE.to_string()),
            watchlist_id: None,
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            watchlist: true,
            lists: true,
            ratings: true,
        }
    }
}

/// Keep the first and last two characters of a secret, star out the rest.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.imdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("imdb.base_url cannot be empty"));
        }
        if self.imdb.request_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("imdb.request_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Merge this config with stored credentials and the process environment.
    pub fn imdb_settings(&self, credentials: &CredentialStore) -> anyhow::Result<ImdbSettings> {
        self.imdb_settings_with_env(credentials, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::imdb_settings`] with an explicit environment lookup.
    pub fn imdb_settings_with_env<F>(&self, credentials: &CredentialStore, env: F) -> anyhow::Result<ImdbSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.validate()?;

        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let cookie_at_main = non_empty(env(ENV_COOKIE_AT_MAIN))
            .or_else(|| non_empty(credentials.get_imdb_cookie_at_main().cloned()))
            .ok_or_else(|| anyhow::anyhow!(
                "IMDb cookie at-main is not configured (set {} or run `imdb-export config set-cookies`)",
                ENV_COOKIE_AT_MAIN
            ))?;
        let cookie_ubid_main = non_empty(env(ENV_COOKIE_UBID_MAIN))
            .or_else(|| non_empty(credentials.get_imdb_cookie_ubid_main().cloned()))
            .ok_or_else(|| anyhow::anyhow!(
                "IMDb cookie ubid-main is not configured (set {} or run `imdb-export config set-cookies`)",
                ENV_COOKIE_UBID_MAIN
            ))?;

        Ok(ImdbSettings {
            cookie_at_main,
            cookie_ubid_main,
            user_id: env(ENV_USER_ID).or_else(|| self.imdb.user_id.clone()),
            watchlist_id: env(ENV_WATCHLIST_ID).or_else(|| self.imdb.watchlist_id.clone()),
            base_url: self.imdb.base_url.clone(),
            request_timeout: self.imdb.request_timeout_secs.map(Duration::from_secs),
        })
    }
}
