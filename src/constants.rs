//! Tuning constants for the feed client.
//!
//! Animation timings match the transitions they drive; changing one
//! without the other desynchronizes the collapse.

// === Remote services ===
pub const DEFAULT_API_BASE_URL: &str = "https://dev.codeleap.co.uk";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://auth.codeleap.co.uk/v1";
pub const DEFAULT_REDIRECT_URL: &str = "https://network.codeleap.co.uk/auth/callback";
pub const HTTP_TIMEOUT_SECS: u64 = 10;

// === Feed ===
/// Fallback author when no username is cached locally.
pub const ANONYMOUS_USERNAME: &str = "Anonymous";
/// Entrance-highlight window for new/edited posts.
pub const HIGHLIGHT_WINDOW_MS: u64 = 3_000;
/// Duration of each staged-delete phase (pending, collapsing).
pub const DELETE_STAGE_MS: u64 = 300;
/// Heart-beat pulse window started when a post is liked.
pub const LIKE_ANIMATION_MS: u64 = 1_000;

// === Scroll-linked header ===
pub const SPACER_MAX_HEIGHT: f32 = 96.0;
pub const SPACER_MIN_HEIGHT: f32 = 48.0;
/// Scroll offset where the header starts collapsing.
pub const SCROLL_COLLAPSE_START: f32 = 10.0;
/// Scroll offset where the header reaches minimum height.
pub const SCROLL_COLLAPSE_END: f32 = 50.0;

// === Visibility tracker ===
/// Viewports narrower than this use the coarse threshold.
pub const NARROW_VIEWPORT_PX: f32 = 880.0;
pub const VISIBILITY_THRESHOLD: f32 = 0.1;
pub const VISIBILITY_THRESHOLD_NARROW: f32 = 0.02;
/// Extra margin below the viewport that still counts as visible.
pub const VISIBILITY_BOTTOM_MARGIN_PX: f32 = 10.0;

/// Truncate a string on a char boundary (safe for multi-byte content).
pub fn truncate_safe(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
