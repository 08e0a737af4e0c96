use reqwest::StatusCode;
use tracing::info;

use crate::config::Config;
use crate::error::ProbeError;
use crate::gocd_client::{is_connection_refused, GoCdClient};
use crate::poller::{Attempt, Poller};

/// Wait until `url` answers a plain GET with 200.
///
/// Refused connections mean the server is still booting and are retried.
/// Any other status or transport error aborts the wait.
pub async fn await_up(
    client: &GoCdClient,
    url: &str,
    config: &Config,
) -> Result<bool, ProbeError> {
    let label = format!("Connect to: {url}");
    let poller = Poller::new(config.polling.interval());

    poller
        .wait_until(
            config.polling.liveness_deadline(),
            &label,
            move || async move {
                match client.ping(url).await {
                    Ok(StatusCode::OK) => Ok(Attempt::Ready(())),
                    Ok(status) => Err(ProbeError::UnexpectedStatus {
                        url: url.to_string(),
                        status,
                    }),
                    Err(err) if is_connection_refused(&err) => {
                        Ok(Attempt::pending("connection refused"))
                    }
                    Err(err) => Err(ProbeError::Http(err)),
                }
            },
        )
        .await?;

    info!(url, "Server is up");
    Ok(true)
}

/// Wait for the primary and then the standby server to come up.
pub async fn await_servers_up(client: &GoCdClient, config: &Config) -> Result<(), ProbeError> {
    await_up(client, &client.primary().base_url, config).await?;
    await_up(client, &client.secondary().base_url, config).await?;
    Ok(())
}
