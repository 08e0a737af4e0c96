//! Probes for integration tests of a GoCD business-continuity pair.
//!
//! Every wait is built on [`Poller`]: a condition is retried at a fixed
//! interval until it reports ready, fails with a non-transient error, or the
//! deadline runs out.

pub mod checks;
pub mod config;
pub mod error;
pub mod gocd_client;
pub mod logging;
pub mod poller;

pub use checks::{await_pipeline_success, await_servers_up, await_up, is_synchronized};
pub use config::Config;
pub use error::ProbeError;
pub use gocd_client::GoCdClient;
pub use poller::{wait_until, Attempt, Poller};
