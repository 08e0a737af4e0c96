use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// Configuration for probing a primary/standby GoCD pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_primary")]
    pub primary: ServerEndpoint,

    #[serde(default = "default_secondary")]
    pub secondary: ServerEndpoint,

    #[serde(default)]
    pub sync: SyncExpectation,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub polling: PollSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            sync: SyncExpectation::default(),
            dashboard: DashboardSettings::default(),
            polling: PollSettings::default(),
        }
    }
}

/// Base URL and optional basic-auth credentials of one server
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerEndpoint {
    pub base_url: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for ServerEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerEndpoint")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// What a fully synchronized standby looks like.
///
/// Older deployments mirror seven artifacts and also report an OAuth setup
/// status; newer ones mirror six and drop that field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncExpectation {
    #[serde(default = "default_expected_matches")]
    pub expected_matches: usize,

    #[serde(default)]
    pub require_oauth_setup: bool,
}

impl Default for SyncExpectation {
    fn default() -> Self {
        Self {
            expected_matches: default_expected_matches(),
            require_oauth_setup: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Version used in `Accept: application/vnd.go.cd.v{N}+json`
    #[serde(default = "default_api_version")]
    pub api_version: u8,

    /// Pipeline name to watch; the first listed pipeline when unset
    #[serde(default)]
    pub pipeline: Option<String>,

    /// Stage name to watch; the first stage of the latest instance when unset
    #[serde(default)]
    pub stage: Option<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            pipeline: None,
            stage: None,
        }
    }
}

impl DashboardSettings {
    pub fn accept_header(&self) -> String {
        format!("application/vnd.go.cd.v{}+json", self.api_version)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_sync_deadline_secs")]
    pub sync_deadline_secs: u64,

    #[serde(default = "default_pipeline_deadline_secs")]
    pub pipeline_deadline_secs: u64,

    #[serde(default = "default_liveness_deadline_secs")]
    pub liveness_deadline_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            sync_deadline_secs: default_sync_deadline_secs(),
            pipeline_deadline_secs: default_pipeline_deadline_secs(),
            liveness_deadline_secs: default_liveness_deadline_secs(),
        }
    }
}

impl PollSettings {
    /// The interval must be non-zero and the request timeout strictly shorter than it.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.poll_interval_ms == 0 {
            return Err(ProbeError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 || self.request_timeout_ms >= self.poll_interval_ms {
            return Err(ProbeError::Config(format!(
                "request_timeout_ms must be between 1 and {} (poll_interval_ms - 1), got {}",
                self.poll_interval_ms - 1,
                self.request_timeout_ms
            )));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn sync_deadline(&self) -> Duration {
        Duration::from_secs(self.sync_deadline_secs)
    }

    pub fn pipeline_deadline(&self) -> Duration {
        Duration::from_secs(self.pipeline_deadline_secs)
    }

    pub fn liveness_deadline(&self) -> Duration {
        Duration::from_secs(self.liveness_deadline_secs)
    }
}

fn default_primary() -> ServerEndpoint {
    ServerEndpoint::new("http://localhost:8153/go")
}

fn default_secondary() -> ServerEndpoint {
    ServerEndpoint::new("http://localhost:8253/go")
}

fn default_expected_matches() -> usize {
    6
}

fn default_api_version() -> u8 {
    2
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    4_000
}

fn default_sync_deadline_secs() -> u64 {
    120
}

fn default_pipeline_deadline_secs() -> u64 {
    180
}

fn default_liveness_deadline_secs() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(poll_interval_ms: u64, request_timeout_ms: u64) -> PollSettings {
        PollSettings {
            poll_interval_ms,
            request_timeout_ms,
            ..PollSettings::default()
        }
    }

    #[test]
    fn default_poll_settings_are_valid() {
        assert!(PollSettings::default().validate().is_ok());
        assert!(settings(100, 80).validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = settings(0, 0).validate().unwrap_err();
        assert!(matches!(err, ProbeError::Config(ref msg) if msg.contains("poll_interval_ms")));
    }

    #[test]
    fn request_timeout_must_be_shorter_than_interval() {
        for (interval, timeout) in [(5_000, 5_000), (50, 1_000), (100, 0)] {
            let err = settings(interval, timeout).validate().unwrap_err();
            assert!(
                matches!(err, ProbeError::Config(ref msg) if msg.contains("request_timeout_ms")),
                "{interval}/{timeout}"
            );
        }
    }
}
