use bridge_core::file_manager::Unsupported;
use bridge_core::file_service::RouteContext;

use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_SETTLE: Duration = Duration::from_secs(2);

/// A loopback port that was free a moment ago.
pub fn free_port() -> u16 {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

pub fn test_context() -> RouteContext {
    RouteContext::new(
        Arc::new(Unsupported {
            platform: "test".to_string(),
        }),
        reqwest::Client::new(),
    )
}

/// Fresh client so no pooled connection outlives a replaced server.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client builds")
}

/// Poll until `addr` refuses connections or the deadline passes.
pub async fn wait_until_closed(addr: &str) -> bool {
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_err() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}
