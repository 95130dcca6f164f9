//! Entry point for the lavatop TUI. Parses args, sets up file logging and
//! runs the App.

use std::{fs, path::PathBuf, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

use lavatop::{app::App, cli::Cli, config::AppConfig, demo, fetch::Fetcher, prefs::load_prefs};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

fn default_log_path() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lavatop")
        .join("lavatop.log")
}

// The terminal belongs to the UI, so diagnostics go to a file.
fn init_logging(path: PathBuf) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone().unwrap_or_else(default_log_path))?;

    let mut config = AppConfig::resolve(&cli)?;

    // Demo mode: point at an in-process mock server.
    let _demo = if cli.demo {
        let (addr, handle) = demo::spawn().await?;
        config.server.url = format!("http://{addr}");
        Some(handle)
    } else {
        None
    };

    let base = config.base_url()?;
    info!(%base, interval_ms = config.refresh.interval_ms, "starting dashboard");
    let fetcher = Fetcher::new(base, config.endpoints.clone(), config.request_timeout())?;

    let mut app = App::new(&config, fetcher, load_prefs());
    app.run().await
}
