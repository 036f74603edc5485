use anyhow::{Context, Result};

use codeleap_feed::config::ClientConfig;
use codeleap_feed::{paths, profile};

pub fn run(email: &str, username: &str) -> Result<()> {
    let config = ClientConfig::load();
    let client = super::auth_client(&config);

    // Username is cached at submission, before the provider round-trip
    profile::save_username(&paths::data_dir(), username);

    client
        .sign_in_with_magic_link(email, username)
        .context("Could not request a magic link")?;

    println!("Check your email for the login link!");
    println!("Then run: codeleap-feed callback \"<link from the email>\"");
    Ok(())
}
