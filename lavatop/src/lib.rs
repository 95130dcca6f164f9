//! lavatop: a live terminal dashboard for a Lavalink server.
//!
//! Polls the stats, info and version endpoints on a timer, keeps a short
//! rolling history for the charts, and tracks connection state with bounded
//! retries at startup.

pub mod app;
pub mod cli;
pub mod config;
pub mod connection;
pub mod dashboard;
pub mod demo;
pub mod events;
pub mod fetch;
pub mod format;
pub mod history;
pub mod prefs;
pub mod scheduler;
pub mod startup;
pub mod summary;
pub mod types;
pub mod ui;
