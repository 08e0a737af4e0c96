use tracing::info;

use crate::config::Config;
use crate::error::ProbeError;
use crate::gocd_client::GoCdClient;
use crate::poller::{Attempt, Poller};

pub const SYNC_FAILED_LABEL: &str = "Sync Failed";

/// Wait until the standby mirrors every expected artifact of the primary.
///
/// A status other than 200 aborts immediately; a standby that never catches
/// up fails with [`ProbeError::TimeoutExceeded`] labelled `Sync Failed`.
pub async fn is_synchronized(client: &GoCdClient, config: &Config) -> Result<bool, ProbeError> {
    let expectation = &config.sync;
    let poller = Poller::new(config.polling.interval());

    let verdict = poller
        .wait_until(
            config.polling.sync_deadline(),
            SYNC_FAILED_LABEL,
            move || async move {
                let status = client.business_continuity_status().await?;
                let verdict = status.evaluate(expectation);
                if verdict.is_synchronized() {
                    Ok::<_, ProbeError>(Attempt::Ready(verdict))
                } else {
                    Ok(Attempt::Pending(verdict.to_string()))
                }
            },
        )
        .await?;

    info!(
        secondary = %client.secondary().base_url,
        matched = verdict.matched,
        "Standby server is in sync"
    );
    Ok(true)
}
