use std::io::Write;
use std::time::Duration;

use clap::Parser;
use lavatop::cli::Cli;
use lavatop::config::{AppConfig, DEFAULT_URL};

#[test]
fn empty_config_uses_defaults() {
    let c = AppConfig::load_from_str("").unwrap();
    assert_eq!(c, AppConfig::default());
    assert_eq!(c.server.url, DEFAULT_URL);
    assert_eq!(c.endpoints.stats, "/v4/stats");
    assert_eq!(c.endpoints.info, "/v4/info");
    assert_eq!(c.endpoints.version, "/version");
    assert_eq!(c.refresh.interval_ms, 5000);
    assert!(c.refresh.auto_refresh);
    assert_eq!(c.connection.max_retries, 5);
    assert_eq!(c.retry_delay(), Duration::from_secs(2));
}

#[test]
fn partial_config_fills_the_rest() {
    let toml = r#"
[server]
url = "https://lava.example.com:443"

[refresh]
interval_ms = 10000
auto_refresh = false
"#;
    let c = AppConfig::load_from_str(toml).unwrap();
    assert_eq!(c.server.url, "https://lava.example.com:443");
    assert_eq!(c.refresh.interval_ms, 10000);
    assert!(!c.refresh.auto_refresh);
    assert_eq!(c.connection.request_timeout_ms, 5000);
    let r = c.refresh_config();
    assert_eq!(r.interval(), Duration::from_secs(10));
    assert!(!r.auto_refresh);
}

#[test]
fn rejects_bad_values() {
    let cases = [
        ("[server]\nurl = \"not a url\"", "server.url"),
        ("[server]\nurl = \"ftp://host\"", "http or https"),
        ("[endpoints]\nstats = \"v4/stats\"", "endpoints.stats must start with '/'"),
        ("[refresh]\ninterval_ms = 3000", "refresh.interval_ms must be one of"),
        ("[connection]\nmax_retries = 0", "connection.max_retries"),
        ("[connection]\nretry_delay_ms = 0", "connection.retry_delay_ms"),
        ("[connection]\nrequest_timeout_ms = 0", "connection.request_timeout_ms"),
    ];
    for (toml, needle) in cases {
        let err = AppConfig::load_from_str(toml).unwrap_err().to_string();
        assert!(err.contains(needle), "{toml:?}: {err}");
    }
}

#[test]
fn rejects_malformed_toml() {
    assert!(AppConfig::load_from_str("[server\nurl=").is_err());
}

#[test]
fn cli_flags_override_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[server]\nurl = \"http://file-host:2333\"\n[refresh]\ninterval_ms = 2000\n[connection]\nmax_retries = 9"
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from([
        "lavatop",
        "http://cli-host:2333",
        "--config",
        &path,
        "-i",
        "30000",
        "--no-auto-refresh",
    ])
    .unwrap();
    let c = AppConfig::resolve(&cli).unwrap();
    assert_eq!(c.server.url, "http://cli-host:2333");
    assert_eq!(c.refresh.interval_ms, 30000);
    assert!(!c.refresh.auto_refresh);
    // Not given on the command line, so the file wins.
    assert_eq!(c.connection.max_retries, 9);
    assert_eq!(c.base_url().unwrap().host_str(), Some("cli-host"));
}

#[test]
fn resolve_validates_overrides() {
    let cli = Cli::try_parse_from(["lavatop", "--interval-ms", "1234"]).unwrap();
    assert!(AppConfig::resolve(&cli).is_err());

    let cli = Cli::try_parse_from(["lavatop", "--max-retries", "0"]).unwrap();
    assert!(AppConfig::resolve(&cli).is_err());
}

#[test]
fn resolve_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let cli = Cli {
        config: Some(missing),
        ..Cli::default()
    };
    let err = AppConfig::resolve(&cli).unwrap_err().to_string();
    assert!(err.contains("reading config"), "{err}");
}
