use anyhow::Result;

use codeleap_feed::config::ClientConfig;
use codeleap_feed::constants::truncate_safe;
use codeleap_feed::header;
use codeleap_feed::time_utils;

/// Render the feed as a table, optionally filtered.
pub fn run(query: Option<&str>) -> Result<()> {
    let config = ClientConfig::load();
    super::require_session(&config)?;

    let mut state = super::feed_state(&config);
    state.load();

    // Banner sized by the scroll-linked header at rest (offset zero)
    let banner_rows = (header::spacer_height(0.0) / 32.0).round() as usize;
    for _ in 0..banner_rows.saturating_sub(1) {
        println!();
    }
    println!("CodeLeap Network");
    println!("{}", "=".repeat(72));

    let query = query.unwrap_or("");
    let posts = state.filtered(query);

    if posts.is_empty() {
        if query.is_empty() {
            println!("No posts yet");
        } else {
            println!("No posts match your search");
        }
        return Ok(());
    }

    println!(
        "{:<14}  {:<28}  {:<14}  {:<8}  {:<5}  {}",
        "ID", "TITLE", "AUTHOR", "AGE", "LIKES", "COMMENTS"
    );
    println!("{}", "-".repeat(84));

    for post in &posts {
        let title = if post.title.len() > 27 {
            format!("{}...", truncate_safe(&post.title, 24))
        } else {
            post.title.clone()
        };
        let author = if post.username.len() > 13 {
            format!("{}...", truncate_safe(&post.username, 10))
        } else {
            post.username.clone()
        };
        let marker = if state.is_highlighted(post.id) { "*" } else { " " };

        println!(
            "{}{:<13}  {:<28}  @{:<13}  {:<8}  {:<5}  {}",
            marker,
            post.id,
            title,
            author,
            time_utils::distance_to_now(&post.created_datetime),
            post.likes,
            post.comments.len(),
        );
    }

    println!("\n{} posts", posts.len());
    Ok(())
}
