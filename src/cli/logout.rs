use anyhow::{Context, Result};

use codeleap_feed::config::ClientConfig;
use codeleap_feed::{paths, profile};

pub fn run() -> Result<()> {
    let config = ClientConfig::load();
    let client = super::auth_client(&config);

    // Cached username is cleared alongside the provider session
    profile::clear(&paths::data_dir());
    client.sign_out().context("Sign-out failed")?;

    println!("Signed out.");
    Ok(())
}
