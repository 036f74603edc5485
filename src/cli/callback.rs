use anyhow::{Context, Result};

use codeleap_feed::config::ClientConfig;
use codeleap_feed::session::{SessionGuard, SessionStatus};
use codeleap_feed::{paths, profile};

/// Consume the emailed redirect URL: persist the username it carries,
/// store the access token, then verify the session end to end.
pub fn run(url: &str) -> Result<()> {
    let config = ClientConfig::load();
    let client = super::auth_client(&config);

    let username = client
        .complete_callback(url)
        .context("Authentication error")?;
    if let Some(username) = &username {
        profile::save_username(&paths::data_dir(), username);
    }

    let mut guard = SessionGuard::new();
    guard.resolve(client.get_session());
    match guard.status() {
        SessionStatus::Authenticated(principal) => {
            println!("Signed in as {}", principal.email);
            if let Some(username) = username {
                println!("Posting as @{}", username);
            }
            Ok(())
        }
        _ => {
            let detail = guard.last_error().unwrap_or("no session").to_string();
            anyhow::bail!(
                "Authentication error: {}. Run 'codeleap-feed login <email> <username>' to return to sign-in.",
                detail
            )
        }
    }
}
