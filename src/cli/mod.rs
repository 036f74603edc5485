pub mod callback;
pub mod feed;
pub mod login;
pub mod logout;
pub mod post;
pub mod social;
pub mod whoami;

use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use codeleap_feed::auth::{AuthClient, Principal};
use codeleap_feed::config::ClientConfig;
use codeleap_feed::feed::FeedState;
use codeleap_feed::gateway::HttpPostGateway;
use codeleap_feed::notify::LogNotifier;
use codeleap_feed::session::{SessionGuard, SessionStatus};
use codeleap_feed::{paths, profile};

pub fn auth_client(config: &ClientConfig) -> AuthClient {
    AuthClient::new(
        &config.auth_base_url,
        &config.redirect_url,
        &paths::data_dir(),
        config.http_timeout(),
    )
}

/// Session guard first: every feed command resolves the session before
/// touching the posts service.
pub fn require_session(config: &ClientConfig) -> Result<Principal> {
    let client = auth_client(config);
    let mut guard = SessionGuard::new();
    guard.resolve(client.get_session());
    match guard.status() {
        SessionStatus::Authenticated(principal) => Ok(principal.clone()),
        _ => {
            if let Some(err) = guard.last_error() {
                bail!(
                    "Session check failed: {}. Run 'codeleap-feed login <email> <username>' to sign in again.",
                    err
                );
            }
            bail!("Not signed in. Run 'codeleap-feed login <email> <username>' first.");
        }
    }
}

/// Feed state wired to the real gateway, the log notifier, and the
/// configured timings — `drive` paces itself from the same config values.
pub fn feed_state(config: &ClientConfig) -> FeedState {
    let gateway = HttpPostGateway::new(&config.api_base_url, config.http_timeout());
    let username = profile::cached_username(&paths::data_dir());
    FeedState::with_timings(
        Box::new(gateway),
        Box::new(LogNotifier),
        username,
        Duration::from_millis(config.highlight_window_ms),
        Duration::from_millis(config.delete_stage_ms),
    )
}

/// Drive the deadline-driven state machine with wall-clock time until
/// `total` has elapsed (staged deletes need two stages to finish).
pub fn drive(state: &mut FeedState, total: Duration) {
    let start = Instant::now();
    while start.elapsed() < total {
        std::thread::sleep(Duration::from_millis(50));
        state.tick(Instant::now());
    }
    state.tick(Instant::now());
}
