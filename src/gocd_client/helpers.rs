use std::error::Error as StdError;
use std::io;

/// Business-continuity status page served by the standby server
pub const BUSINESS_CONTINUITY_DASHBOARD_PATH: &str =
    "/add-on/business-continuity/admin/dashboard.json";
pub const DASHBOARD_PATH: &str = "/api/dashboard";

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// True when the request never reached the server because the port refused
/// the connection. DNS failures, TLS errors and timeouts are not included.
pub fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    false
}
