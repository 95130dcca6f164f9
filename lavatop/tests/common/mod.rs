// Shared test helpers: throwaway HTTP servers on 127.0.0.1.
#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use lavatop::config::Endpoints;
use lavatop::fetch::Fetcher;
use url::Url;

pub const STATS_JSON: &str = r#"{
    "memory": {"used": 500000000, "allocated": 1000000000, "free": 500000000, "reservable": 2000000000},
    "cpu": {"lavalinkLoad": 0.25, "systemLoad": 0.5, "cores": 4},
    "players": 2,
    "playingPlayers": 1,
    "frameStats": {"sent": 100, "nulled": 0, "deficit": 0},
    "uptime": 90000
}"#;

pub const INFO_JSON: &str = r#"{
    "version": {"semver": "4.0.8", "build": 1717000000000},
    "git": {"branch": "main", "commit": "6e7d2b1f0c9a"},
    "jvm": "17.0.11",
    "lavaplayer": "2.2.1",
    "os": {"name": "Linux", "version": "6.8.0", "arch": "amd64"},
    "sourceManagers": ["youtube", "http"],
    "plugins": [{"name": "lavasrc-plugin", "version": "4.2.0"}]
}"#;

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    Url::parse(&format!("http://{addr}")).expect("url")
}

pub fn fetcher(base: Url) -> Fetcher {
    Fetcher::new(base, Endpoints::default(), Duration::from_secs(2)).expect("client")
}

/// A base URL nothing is listening on.
pub fn dead_base() -> Url {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("url")
}
