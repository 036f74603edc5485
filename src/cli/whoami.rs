use anyhow::Result;

use codeleap_feed::config::ClientConfig;
use codeleap_feed::session::{SessionGuard, SessionStatus};
use codeleap_feed::{paths, profile};

pub fn run() -> Result<()> {
    let config = ClientConfig::load();
    let client = super::auth_client(&config);

    let mut guard = SessionGuard::new();
    guard.resolve(client.get_session());

    match guard.status() {
        SessionStatus::Authenticated(principal) => {
            println!("Signed in as {}", principal.email);
        }
        _ => {
            match guard.last_error() {
                Some(err) => println!("Session check failed: {}", err),
                None => println!("Not signed in."),
            }
        }
    }
    match profile::cached_username(&paths::data_dir()) {
        Some(username) => println!("Posting as @{}", username),
        None => println!("No cached username (posts would be by 'Anonymous')."),
    }
    Ok(())
}
