use tracing::{info, warn};

use crate::config::Config;
use crate::error::ProbeError;
use crate::gocd_client::{stage_status, GoCdClient};
use crate::poller::{Attempt, Poller};

pub const PIPELINE_FAILED_MESSAGE: &str = "Pipeline was not built successfully";

/// Wait for the watched stage on the primary dashboard to report `Passed`.
///
/// A dashboard that does not list the pipeline, an instance or the stage yet
/// counts as not started and keeps the wait going. Running out of time is
/// reported as [`ProbeError::PipelineFailed`] rather than a generic timeout.
pub async fn await_pipeline_success(
    client: &GoCdClient,
    config: &Config,
) -> Result<(), ProbeError> {
    let settings = &config.dashboard;
    let poller = Poller::new(config.polling.interval());

    let outcome = poller
        .wait_until(
            config.polling.pipeline_deadline(),
            "Pipeline build",
            move || async move {
                let dashboard = client.dashboard(settings).await?;
                let attempt = match stage_status(
                    &dashboard,
                    settings.pipeline.as_deref(),
                    settings.stage.as_deref(),
                ) {
                    None => Attempt::pending("pipeline has not started yet"),
                    Some(stage) if stage.is_passed() => Attempt::Ready(stage),
                    Some(stage) => Attempt::pending(format!(
                        "stage {}/{} is {}",
                        stage.pipeline, stage.stage, stage.status
                    )),
                };
                Ok::<_, ProbeError>(attempt)
            },
        )
        .await;

    match outcome {
        Ok(stage) => {
            info!(
                pipeline = %stage.pipeline,
                stage = %stage.stage,
                "Pipeline completed with success"
            );
            Ok(())
        }
        Err(ProbeError::TimeoutExceeded { waited, .. }) => {
            warn!(waited = ?waited, "Pipeline did not pass before the deadline");
            Err(ProbeError::PipelineFailed(PIPELINE_FAILED_MESSAGE.to_string()))
        }
        Err(err) => Err(err),
    }
}
