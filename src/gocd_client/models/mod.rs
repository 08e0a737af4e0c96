mod dashboard;
mod sync_status;

pub use dashboard::{stage_status, StageStatus, PASSED};
pub use sync_status::{SyncStatusPayload, SyncVerdict};
