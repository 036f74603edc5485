//! Scroll-linked header — maps the scroll offset to a spacer height.
//!
//! Three-piece linear interpolation: full height up to the collapse start,
//! minimum height past the collapse end, linear in between. Agnostic to
//! which scrolling primitive reports the offset (native or smooth-scroll
//! polyfill).

use crate::constants::{
    SCROLL_COLLAPSE_END, SCROLL_COLLAPSE_START, SPACER_MAX_HEIGHT, SPACER_MIN_HEIGHT,
};

pub fn spacer_height(scroll_top: f32) -> f32 {
    if scroll_top <= SCROLL_COLLAPSE_START {
        return SPACER_MAX_HEIGHT;
    }
    if scroll_top >= SCROLL_COLLAPSE_END {
        return SPACER_MIN_HEIGHT;
    }
    let scroll_range = SCROLL_COLLAPSE_END - SCROLL_COLLAPSE_START;
    let height_range = SPACER_MAX_HEIGHT - SPACER_MIN_HEIGHT;
    SPACER_MAX_HEIGHT - (scroll_top - SCROLL_COLLAPSE_START) / scroll_range * height_range
}

pub fn is_scrolled(scroll_top: f32) -> bool {
    scroll_top > SCROLL_COLLAPSE_START
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_height_at_top() {
        assert_eq!(spacer_height(0.0), SPACER_MAX_HEIGHT);
        assert_eq!(spacer_height(10.0), SPACER_MAX_HEIGHT);
    }

    #[test]
    fn test_min_height_past_end() {
        assert_eq!(spacer_height(50.0), SPACER_MIN_HEIGHT);
        assert_eq!(spacer_height(5000.0), SPACER_MIN_HEIGHT);
    }

    #[test]
    fn test_linear_midpoint() {
        // Midway through (10, 50) the spacer sits midway through (96, 48)
        let h = spacer_height(30.0);
        assert!((h - 72.0).abs() < 1e-5, "h = {}", h);
    }

    #[test]
    fn test_monotonic_decrease() {
        let mut prev = spacer_height(10.0);
        for step in 11..=50 {
            let h = spacer_height(step as f32);
            assert!(h <= prev);
            prev = h;
        }
    }

    #[test]
    fn test_is_scrolled_boundary() {
        assert!(!is_scrolled(10.0));
        assert!(is_scrolled(10.5));
    }
}
