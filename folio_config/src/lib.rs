use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use config::{File, FileFormat};
use folio_models::notification::NotificationPosition;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

/// Environment variable holding a colon separated list of additional config
/// files.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Load the default config and every file listed in [`CONFIG_PATH_ENV`].
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATH_ENV)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<PathBuf>>())
        .unwrap_or_default();
    load_with_override(&paths, &[])
}

/// Load the default config, then `paths` in order, then the inline TOML
/// `overrides`. Later sources take precedence.
pub fn load_with_override(paths: &[impl AsRef<Path>], overrides: &[&str]) -> anyhow::Result<Config> {
    let builder =
        config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
    })?;

    let config: Config = overrides
        .iter()
        .fold(builder, |builder, source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")?;

    ensure!(
        config.notifications.limit > 0,
        "notifications.limit must be at least 1"
    );

    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub contact: ContactConfig,
    pub relay: RelayConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient_label: String,
    pub fallback_address: String,
}

#[derive(Deserialize)]
pub struct RelayConfig {
    pub endpoint_override: Option<Url>,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("endpoint_override", &self.endpoint_override.as_ref().map(Url::as_str))
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &"[redacted]")
            .field("access_token", &self.access_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct NotificationsConfig {
    pub position: NotificationPosition,
    /// Maximum number of visible notifications, at least 1.
    pub limit: usize,
    pub dismissible: bool,
    pub pause_on_hover: bool,
    pub warning_auto_close: Duration,
    pub success_auto_close: Duration,
    pub failure_auto_close: Duration,
}
