mod liveness;
mod pipeline_status;
mod sync_state;

pub use liveness::{await_servers_up, await_up};
pub use pipeline_status::{await_pipeline_success, PIPELINE_FAILED_MESSAGE};
pub use sync_state::{is_synchronized, SYNC_FAILED_LABEL};
