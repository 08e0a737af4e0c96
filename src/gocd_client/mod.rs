mod client;
mod helpers;
mod models;

pub use client::GoCdClient;
pub use helpers::{
    is_connection_refused, join_url, BUSINESS_CONTINUITY_DASHBOARD_PATH, DASHBOARD_PATH,
};
pub use models::{stage_status, StageStatus, SyncStatusPayload, SyncVerdict, PASSED};
