use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};

use codeleap_feed::config::ClientConfig;

pub fn create(title: &str, content: &str) -> Result<()> {
    let config = ClientConfig::load();
    super::require_session(&config)?;

    let mut state = super::feed_state(&config);
    let id = state
        .create(title, content, Instant::now())
        .context("Could not create post")?;

    println!("Created post {} — \"{}\"", id, title);
    Ok(())
}

pub fn edit(id: i64, title: &str, content: &str) -> Result<()> {
    let config = ClientConfig::load();
    super::require_session(&config)?;

    let mut state = super::feed_state(&config);
    state.load();
    state
        .edit(id, title, content, Instant::now())
        .context("Could not edit post")?;
    Ok(())
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    let config = ClientConfig::load();
    super::require_session(&config)?;

    let mut state = super::feed_state(&config);
    state.load();

    let (title, author) = match state.posts().iter().find(|p| p.id == id) {
        Some(post) => (post.title.clone(), post.username.clone()),
        None => bail!("Post not found: {}", id),
    };

    if !yes && !confirm(&title, &author)? {
        println!("Cancelled.");
        return Ok(());
    }

    state
        .delete(id, Instant::now())
        .context("Could not delete post")?;

    // Let both staged phases elapse so the remote delete actually fires
    let stages = Duration::from_millis(2 * config.delete_stage_ms + 100);
    super::drive(&mut state, stages);
    Ok(())
}

fn confirm(title: &str, author: &str) -> Result<bool> {
    print!(
        "Are you sure you want to delete \"{}\" by \"{}\"? [y/N] ",
        title, author
    );
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
