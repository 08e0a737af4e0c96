use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::{Config, DashboardSettings, ServerEndpoint};
use crate::error::ProbeError;

use super::helpers::{join_url, BUSINESS_CONTINUITY_DASHBOARD_PATH, DASHBOARD_PATH};
use super::models::SyncStatusPayload;

/// HTTP access to the primary and standby servers of a business-continuity pair.
#[derive(Clone)]
pub struct GoCdClient {
    http: Client,
    primary: ServerEndpoint,
    secondary: ServerEndpoint,
}

impl GoCdClient {
    /// Prepare an HTTP client whose per-request timeout comes from the poll settings,
    /// so a hanging server cannot stretch a poll past its deadline.
    pub fn new(config: &Config) -> Result<Self, ProbeError> {
        config.polling.validate()?;

        let http = Client::builder()
            .timeout(config.polling.request_timeout())
            .build()
            .map_err(ProbeError::Http)?;

        Ok(Self {
            http,
            primary: config.primary.clone(),
            secondary: config.secondary.clone(),
        })
    }

    pub fn primary(&self) -> &ServerEndpoint {
        &self.primary
    }

    pub fn secondary(&self) -> &ServerEndpoint {
        &self.secondary
    }

    /// Fetch the business-continuity dashboard from the standby server.
    pub async fn business_continuity_status(&self) -> Result<SyncStatusPayload, ProbeError> {
        self.get_json(&self.secondary, BUSINESS_CONTINUITY_DASHBOARD_PATH, None)
            .await
    }

    /// Fetch the pipeline dashboard from the primary server.
    pub async fn dashboard(&self, settings: &DashboardSettings) -> Result<Value, ProbeError> {
        let accept = settings.accept_header();
        self.get_json(&self.primary, DASHBOARD_PATH, Some(accept.as_str()))
            .await
    }

    /// Plain unauthenticated GET; the caller decides how to treat transport errors.
    pub async fn ping(&self, url: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self.http.get(url).send().await?;
        Ok(response.status())
    }

    async fn get_json<T>(
        &self,
        server: &ServerEndpoint,
        path: &str,
        accept: Option<&str>,
    ) -> Result<T, ProbeError>
    where
        T: DeserializeOwned,
    {
        let url = join_url(&server.base_url, path);
        let mut request = self.http.get(&url);
        if let Some(username) = &server.username {
            request = request.basic_auth(username, server.password.as_ref());
        }
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProbeError::UnexpectedStatus { url, status });
        }

        let body = response.bytes().await?;
        debug!(url = %url, bytes = body.len(), "Fetched JSON payload");
        serde_json::from_slice(&body).map_err(|source| ProbeError::Decode { url, source })
    }
}
