#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub use gocd_bc_probes::config::{PollSettings, ServerEndpoint};
pub use gocd_bc_probes::{Config, GoCdClient, ProbeError};
pub use serde_json::{json, Value};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpSocket;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "badger";
pub const INTERVAL: Duration = Duration::from_millis(100);
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(80);

/// Config pointing both servers at the given URLs with fast polling.
pub fn test_config(primary: &str, secondary: &str) -> Config {
    gocd_bc_probes::logging::init_logging();

    let mut config = Config::default();
    config.primary = ServerEndpoint::new(primary).with_credentials(USERNAME, PASSWORD);
    config.secondary = ServerEndpoint::new(secondary).with_credentials(USERNAME, PASSWORD);
    config.polling = PollSettings {
        poll_interval_ms: INTERVAL.as_millis() as u64,
        request_timeout_ms: REQUEST_TIMEOUT.as_millis() as u64,
        sync_deadline_secs: 1,
        pipeline_deadline_secs: 1,
        liveness_deadline_secs: 2,
    };
    config
}

pub fn client_for(config: &Config) -> GoCdClient {
    GoCdClient::new(config).expect("client should build")
}

/// Business-continuity payload where the first `matching` of `total` artifacts agree.
pub fn sync_body(matching: usize, total: usize) -> Value {
    let keys = [
        "configFilesUpdateTime",
        "cruiseConfigXml",
        "userFeatureToggles",
        "cipherFile",
        "jettyConfig",
        "pluginsZip",
        "wrapperConfig",
    ];
    let mut primary = serde_json::Map::new();
    let mut standby = serde_json::Map::new();
    for (idx, key) in keys.iter().take(total).enumerate() {
        primary.insert(key.to_string(), json!({ "md5": format!("md5-{idx}") }));
        let standby_md5 = if idx < matching {
            format!("md5-{idx}")
        } else {
            format!("stale-{idx}")
        };
        standby.insert(key.to_string(), json!(standby_md5));
    }

    json!({
        "primaryServerDetails": primary,
        "standbyServerDetails": standby,
        "syncErrors": [],
    })
}

/// Dashboard payload; `None` models a pipeline that has not been scheduled yet.
pub fn dashboard_body(status: Option<&str>) -> Value {
    let instances = match status {
        Some(status) => json!([{
            "counter": 1,
            "_embedded": { "stages": [{ "name": "up42_stage", "status": status }] }
        }]),
        None => json!([]),
    };

    json!({
        "_embedded": {
            "pipeline_groups": [{
                "name": "first",
                "_embedded": {
                    "pipelines": [{ "name": "up42", "_embedded": { "instances": instances } }]
                }
            }]
        }
    })
}

/// A socket bound to a local port but not listening.
/// Connections to its address are refused while it is held, and no other
/// process can take the port in the meantime.
pub fn reserved_port() -> (TcpSocket, SocketAddr) {
    let socket = TcpSocket::new_v4().expect("create socket");
    socket
        .bind("127.0.0.1:0".parse().expect("loopback addr"))
        .expect("bind ephemeral port");
    let addr = socket.local_addr().expect("local addr");
    (socket, addr)
}

/// Start listening on the reserved `socket` after `delay`, answering every
/// request with a bare HTTP 200. Returns a counter of served requests.
pub fn serve_ok_after(socket: TcpSocket, delay: Duration) -> Arc<AtomicUsize> {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let listener = socket.listen(16).expect("listen on reserved port");
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok")
                .await;
        }
    });

    hits
}
