//! Visibility tracker — one-shot entrance-animation trigger per post.
//!
//! Given a post's bounding rect and the viewport, fire once when the
//! intersection ratio crosses a device-dependent threshold, then stop
//! observing that post.

use std::collections::HashSet;

use crate::constants::{
    NARROW_VIEWPORT_PX, VISIBILITY_BOTTOM_MARGIN_PX, VISIBILITY_THRESHOLD,
    VISIBILITY_THRESHOLD_NARROW,
};

/// Bounding box of a rendered post, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Coarser threshold on narrow viewports, where posts are taller.
pub fn threshold_for(viewport_width: f32) -> f32 {
    if viewport_width < NARROW_VIEWPORT_PX {
        VISIBILITY_THRESHOLD_NARROW
    } else {
        VISIBILITY_THRESHOLD
    }
}

/// Fraction of the rect inside the viewport, extended by the bottom margin.
pub fn intersection_ratio(rect: Rect, viewport: Viewport) -> f32 {
    if rect.height <= 0.0 {
        return 0.0;
    }
    let visible_top = rect.top.max(0.0);
    let visible_bottom = (rect.top + rect.height).min(viewport.height + VISIBILITY_BOTTOM_MARGIN_PX);
    ((visible_bottom - visible_top) / rect.height).clamp(0.0, 1.0)
}

#[derive(Debug, Default)]
pub struct VisibilityTracker {
    fired: HashSet<i64>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe one post. Returns true exactly once, on the first crossing;
    /// the post is then detached and never fires again.
    pub fn observe(&mut self, id: i64, rect: Rect, viewport: Viewport) -> bool {
        if self.fired.contains(&id) {
            return false;
        }
        if intersection_ratio(rect, viewport) >= threshold_for(viewport.width) {
            self.fired.insert(id);
            return true;
        }
        false
    }

    /// Optimistically created posts skip observation entirely.
    pub fn bypass(&mut self, id: i64) {
        self.fired.insert(id);
    }

    pub fn has_fired(&self, id: i64) -> bool {
        self.fired.contains(&id)
    }

    /// Forget posts removed from the feed.
    pub fn forget(&mut self, id: i64) {
        self.fired.remove(&id);
    }
}
