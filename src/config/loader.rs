use std::env;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::ProbeError;

use super::Config;

/// Environment variable naming the JSON config file
pub const CONFIG_PATH_ENV: &str = "GOCD_BC_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "bc-config.json";

impl Config {
    /// Load configuration from the JSON file named by `GOCD_BC_CONFIG`
    /// (or `bc-config.json` in the working directory), then apply env overrides.
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        Self::load_with(|key| env::var(key).ok()).await
    }

    /// [`Config::load`] with every environment read going through `lookup`.
    pub async fn load_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = config_path(&lookup);
        let mut config = if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        } else {
            match Self::from_file(&path).await {
                Ok(config) => config,
                Err(err) => {
                    warn!(error = ?err, "Failed to load config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(&lookup);
        info!(
            primary = %config.primary.base_url,
            secondary = %config.secondary.base_url,
            expected_matches = config.sync.expected_matches,
            "Loaded configuration"
        );
        config
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ProbeError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .map_err(|err| ProbeError::Config(format!("Failed to read config file: {err}")))?;

        let config: Self = serde_json::from_str(&contents).map_err(|err| {
            ProbeError::Config(format!("Failed to parse {}: {err}", path.display()))
        })?;
        config.polling.validate()?;
        Ok(config)
    }

    /// Overlay URLs and credentials from the environment.
    /// Blank values are ignored; per-server credentials win over shared ones.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = get("GOCD_PRIMARY_URL") {
            debug!(url = %url, "Primary URL overridden from env");
            self.primary.base_url = url;
        }
        if let Some(url) = get("GOCD_SECONDARY_URL") {
            debug!(url = %url, "Secondary URL overridden from env");
            self.secondary.base_url = url;
        }

        if let Some(username) = get("GOCD_USERNAME") {
            self.primary.username = Some(username.clone());
            self.secondary.username = Some(username);
        }
        if let Some(password) = get("GOCD_PASSWORD") {
            self.primary.password = Some(password.clone());
            self.secondary.password = Some(password);
        }

        if let Some(username) = get("GOCD_PRIMARY_USERNAME") {
            self.primary.username = Some(username);
        }
        if let Some(password) = get("GOCD_PRIMARY_PASSWORD") {
            self.primary.password = Some(password);
        }
        if let Some(username) = get("GOCD_SECONDARY_USERNAME") {
            self.secondary.username = Some(username);
        }
        if let Some(password) = get("GOCD_SECONDARY_PASSWORD") {
            self.secondary.password = Some(password);
        }
    }
}

fn config_path<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(CONFIG_PATH_ENV) {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}
