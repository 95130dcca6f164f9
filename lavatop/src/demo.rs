//! Built-in mock Lavalink server for `--demo`: serves synthetic payloads on
//! the standard endpoints from an ephemeral local port.

use std::{net::SocketAddr, sync::Arc, time::Instant};

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tracing::{info, warn};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Clone)]
struct DemoState {
    started: Arc<Instant>,
}

pub fn router() -> Router {
    Router::new()
        .route("/v4/stats", get(stats))
        .route("/v4/info", get(info))
        .route("/version", get(version))
        .with_state(DemoState {
            started: Arc::new(Instant::now()),
        })
}

/// Bind 127.0.0.1 on a free port and serve in the background.
pub async fn spawn() -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "demo server listening");
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router()).await {
            warn!("demo server stopped: {e}");
        }
    });
    Ok((addr, handle))
}

// Slow waves so the charts have something to show.
fn wave(t: f64, period_s: f64, lo: f64, hi: f64) -> f64 {
    let phase = (t / period_s * std::f64::consts::TAU).sin() * 0.5 + 0.5;
    lo + (hi - lo) * phase
}

async fn stats(State(state): State<DemoState>) -> Json<Value> {
    let elapsed = state.started.elapsed();
    let t = elapsed.as_secs_f64();
    let allocated = 2.0 * GIB;
    let used = wave(t, 90.0, 0.35, 0.8) * allocated;
    let players = wave(t, 120.0, 4.0, 40.0).round() as u64;
    let sent = (t * 50.0 * players as f64) as u64;

    Json(json!({
        "players": players,
        "playingPlayers": players * 3 / 4,
        "uptime": 7_200_000 + elapsed.as_millis() as u64,
        "memory": {
            "free": (allocated - used) as u64,
            "used": used as u64,
            "allocated": allocated as u64,
            "reservable": (4.0 * GIB) as u64,
        },
        "cpu": {
            "cores": 8,
            "systemLoad": wave(t, 45.0, 0.15, 0.65),
            "lavalinkLoad": wave(t, 30.0, 0.02, 0.35),
        },
        "frameStats": {
            "sent": sent,
            "nulled": sent / 400,
            "deficit": sent / 1000,
        },
        "threads": { "running": 42, "daemon": 30, "peak": 57 },
    }))
}

async fn info() -> Json<Value> {
    Json(json!({
        "version": { "semver": "4.0.8", "build": 1_717_000_000_000_i64 },
        "git": { "branch": "main", "commit": "6e7d2b1f0c9a4e8d" },
        "jvm": "17.0.11",
        "lavaplayer": "2.2.1",
        "os": { "name": "Linux", "version": "6.8.0", "arch": "amd64" },
        "sourceManagers": ["youtube", "soundcloud", "bandcamp", "twitch", "http", "local"],
        "plugins": [
            { "name": "lavasrc-plugin", "version": "4.2.0" },
            { "name": "sponsorblock-plugin", "version": "3.0.1" },
        ],
    }))
}

async fn version() -> &'static str {
    "4.0.8"
}
