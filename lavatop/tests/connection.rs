//! Connection controller transitions.

use chrono::Local;
use lavatop::connection::{ConnectionController, ConnectionStatus, Transition};
use lavatop::events::{BannerLevel, LogLevel};

const REASON: &str = "HTTP 502: Bad Gateway";

#[test]
fn starts_connecting() {
    let c = ConnectionController::new(5);
    assert_eq!(c.status(), ConnectionStatus::Connecting);
    assert_eq!(c.retry_count(), 0);
    assert!(c.is_initializing());
    assert!(c.last_success_at().is_none());
}

#[test]
fn startup_failures_count_up_then_give_up() {
    let mut c = ConnectionController::new(5);
    for attempt in 1..5 {
        let t = c.on_failure(&REASON);
        assert_eq!(t, Transition::Retrying { attempt, max: 5 });
        assert_eq!(c.status(), ConnectionStatus::Connecting);
        let banner = t.banner().unwrap();
        assert_eq!(banner.level, BannerLevel::Warning);
        assert_eq!(banner.message, format!("Connecting to Lavalink... (Attempt {attempt}/5)"));
        assert!(t.log_entry().is_none());
    }

    let t = c.on_failure(&REASON);
    assert_eq!(
        t,
        Transition::GaveUp { attempts: 5, reason: REASON.into() }
    );
    assert_eq!(c.status(), ConnectionStatus::Offline);
    assert!(!c.is_initializing());
    assert_eq!(c.retry_count(), 5);
    assert_eq!(t.banner().unwrap().level, BannerLevel::Error);
    assert_eq!(
        t.log_entry(),
        Some((LogLevel::Error, "Failed to connect after 5 attempts".into()))
    );
}

#[test]
fn no_retry_increments_after_giving_up() {
    let mut c = ConnectionController::new(3);
    for _ in 0..3 {
        c.on_failure(&REASON);
    }
    for _ in 0..10 {
        let t = c.on_failure(&REASON);
        assert_eq!(t, Transition::StillOffline { reason: REASON.into() });
        assert_eq!(c.retry_count(), 3);
        assert_eq!(c.status(), ConnectionStatus::Offline);
        // Banner stays up, log stays quiet.
        assert!(t.banner().is_some());
        assert!(t.log_entry().is_none());
    }
}

#[test]
fn success_resets_from_any_state() {
    // mid-startup
    let mut c = ConnectionController::new(5);
    c.on_failure(&REASON);
    c.on_failure(&REASON);
    let now = Local::now();
    assert_eq!(c.on_success(now), Transition::Connected);
    assert_eq!(c.retry_count(), 0);
    assert!(!c.is_initializing());
    assert_eq!(c.last_success_at(), Some(&now));

    // after giving up
    let mut c = ConnectionController::new(2);
    c.on_failure(&REASON);
    c.on_failure(&REASON);
    assert_eq!(c.status(), ConnectionStatus::Offline);
    assert_eq!(c.on_success(Local::now()), Transition::Connected);
    assert_eq!(c.retry_count(), 0);
    assert_eq!(c.status(), ConnectionStatus::Online);
}

#[test]
fn connected_is_only_reported_on_the_edge() {
    let mut c = ConnectionController::new(5);
    let first = c.on_success(Local::now());
    assert_eq!(first, Transition::Connected);
    assert_eq!(
        first.log_entry(),
        Some((LogLevel::Success, "Connected to Lavalink server".into()))
    );
    assert!(first.banner().is_none());

    let again = c.on_success(Local::now());
    assert_eq!(again, Transition::Refreshed);
    assert!(again.log_entry().is_none());
}

#[test]
fn loss_after_connecting_is_uncapped() {
    let mut c = ConnectionController::new(5);
    c.on_success(Local::now());

    let t = c.on_failure(&REASON);
    assert_eq!(t, Transition::Lost { reason: REASON.into() });
    assert_eq!(c.status(), ConnectionStatus::Offline);
    assert_eq!(
        t.log_entry(),
        Some((LogLevel::Error, format!("Connection lost: {REASON}")))
    );
    assert_eq!(t.banner().unwrap().message, format!("Connection lost: {REASON}"));

    for _ in 0..20 {
        assert!(matches!(c.on_failure(&REASON), Transition::StillOffline { .. }));
    }
    assert_eq!(c.retry_count(), 0);

    assert_eq!(c.on_success(Local::now()), Transition::Connected);
}
