mod loader;
mod types;

pub use loader::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
pub use types::{Config, DashboardSettings, PollSettings, ServerEndpoint, SyncExpectation};
