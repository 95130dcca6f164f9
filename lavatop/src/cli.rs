//! Command-line flags. Anything left unset falls back to the config file,
//! then to built-in defaults.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Terminal dashboard for a Lavalink server", long_about = None)]
pub struct Cli {
    /// Lavalink base URL, e.g. http://localhost:2333
    pub url: Option<String>,

    /// TOML config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Refresh interval in milliseconds (1000, 2000, 5000, 10000, 30000, 60000)
    #[arg(long, short = 'i')]
    pub interval_ms: Option<u64>,

    /// Start with auto-refresh paused
    #[arg(long)]
    pub no_auto_refresh: bool,

    /// Connection attempts before giving up at startup
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Delay between startup connection attempts in milliseconds
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Write diagnostics here instead of the default cache location
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Run against a built-in mock server
    #[arg(long)]
    pub demo: bool,
}
