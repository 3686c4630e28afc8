//! Load configuration via `config` crate with env-override support.

use std::{
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use config::{FileFormat, FileSourceFile, Source, builder::DefaultState};
use reqwest::Url;
use serde::Deserialize;

use super::types::Res;

/// Settings file looked up in the working directory when no path is given.
const DEFAULT_SETTINGS_PATH: &str = "settings.conf";

/// Fallback settings file, in TOML.
const FALLBACK_SETTINGS_PATH: &str = ".hidden/config.toml";

/// Default timeout for requests to the inventory API, in seconds.
fn default_request_timeout_secs() -> u64 {
    10
}

/// Configuration for the snipeit-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// The `[slack]` section.
    pub slack: SlackConfig,
    /// The `[snipe-it]` section.
    pub snipe_it: SnipeItConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SlackConfig {
    /// Slack bot token (`SNIPEIT_BOT_SLACK__API_TOKEN`).
    pub api_token: String,
    /// Slack app-level token used for Socket Mode (`SNIPEIT_BOT_SLACK__APP_TOKEN`).
    pub app_token: String,
    /// User ID of the bot, as it appears in mentions (`SNIPEIT_BOT_SLACK__BOT_ID`).
    pub bot_id: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SnipeItConfig {
    /// Snipe-IT API token (`SNIPEIT_BOT_SNIPE_IT__API_TOKEN`).
    pub api_token: String,
    /// Snipe-IT base URL, e.g. `https://assets.example.com/` (`SNIPEIT_BOT_SNIPE_IT__BASE_URL`).
    pub base_url: String,
    /// Timeout for each request to the Snipe-IT API (`SNIPEIT_BOT_SNIPE_IT__REQUEST_TIMEOUT_SECS`).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(file_source(p));
        } else if Path::new(DEFAULT_SETTINGS_PATH).exists() {
            cfg = cfg.add_source(file_source(Path::new(DEFAULT_SETTINGS_PATH)));
        } else if Path::new(FALLBACK_SETTINGS_PATH).exists() {
            cfg = cfg.add_source(file_source(Path::new(FALLBACK_SETTINGS_PATH)));
        }

        Self::from_builder(cfg.add_source(environment()))
    }

    /// Build and validate a configuration from prepared sources.
    pub fn from_builder(builder: config::ConfigBuilder<DefaultState>) -> Res<Self> {
        let raw = builder.build()?;

        // Settings files name the section `snipe-it`; environment keys can only spell it `snipe_it`.
        let mut normalized = config::Config::builder();
        if let Some(section) = raw.collect()?.remove("snipe-it") {
            for (key, value) in section.into_table()? {
                normalized = normalized.set_default(format!("snipe_it.{key}"), value)?;
            }
        }

        let mut inner: ConfigInner = normalized.add_source(raw).build()?.try_deserialize()?;

        if inner.slack.api_token.is_empty() || inner.slack.app_token.is_empty() || inner.slack.bot_id.is_empty() {
            return Err(anyhow::anyhow!("The `slack` section requires `api_token`, `app_token` and `bot_id`."));
        }

        if inner.snipe_it.api_token.is_empty() {
            return Err(anyhow::anyhow!("The `snipe-it` section requires `api_token`."));
        }

        if !inner.snipe_it.base_url.ends_with('/') {
            inner.snipe_it.base_url.push('/');
        }

        let url = Url::parse(&inner.snipe_it.base_url).map_err(|e| anyhow::anyhow!("Invalid Snipe-IT base URL `{}`: {}", inner.snipe_it.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow::anyhow!("Snipe-IT base URL must be http or https."));
        }

        if inner.snipe_it.request_timeout_secs < 1 || inner.snipe_it.request_timeout_secs > 300 {
            return Err(anyhow::anyhow!("Snipe-IT request timeout must be between 1 and 300 seconds."));
        }

        Ok(Config { inner: Arc::new(inner) })
    }
}

/// Environment overrides, e.g. `SNIPEIT_BOT_SNIPE_IT__BASE_URL`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("SNIPEIT_BOT").prefix_separator("_").separator("__")
}

/// Settings files ending in `.conf` or `.ini` are INI; anything else is detected by extension.
fn file_source(path: &Path) -> config::File<FileSourceFile, FileFormat> {
    let file = config::File::from(PathBuf::from(path));

    match path.extension().and_then(|e| e.to_str()) {
        Some("conf" | "ini") => file.format(FileFormat::Ini),
        _ => file,
    }
}
