use std::time::Instant;

use anyhow::{bail, Context, Result};

use codeleap_feed::config::ClientConfig;

/// Likes never reach the server — they last for this invocation only.
/// Kept for parity with the dashboard's heart button.
pub fn like(id: i64) -> Result<()> {
    let config = ClientConfig::load();
    super::require_session(&config)?;

    let mut state = super::feed_state(&config);
    state.load();

    if !state.like(id, Instant::now()) {
        bail!("Post not found: {}", id);
    }
    if let Some(post) = state.posts().iter().find(|p| p.id == id) {
        let verb = if post.liked { "Liked" } else { "Unliked" };
        println!("{} \"{}\" — {} likes (session-local)", verb, post.title, post.likes);
    }
    Ok(())
}

pub fn comment(id: i64, text: &str) -> Result<()> {
    let config = ClientConfig::load();
    super::require_session(&config)?;

    let mut state = super::feed_state(&config);
    state.load();

    state.add_comment(id, text).context("Could not add comment")?;
    if let Some(post) = state.posts().iter().find(|p| p.id == id) {
        println!(
            "Commented on \"{}\" — {} comments (session-local)",
            post.title,
            post.comments.len()
        );
    }
    Ok(())
}
