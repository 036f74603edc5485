//! Feed state manager — owns the in-memory post list and every mutation
//! on it: optimistic create, confirmed edit, staged delete, local likes
//! and comments, search filtering.
//!
//! Timers never resolve on their own. Staged deletes and the highlight
//! window are plain deadline entries advanced by `tick()`, so the whole
//! choreography is testable without sleeping.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::constants::{
    ANONYMOUS_USERNAME, DELETE_STAGE_MS, HIGHLIGHT_WINDOW_MS, LIKE_ANIMATION_MS,
};
use crate::error::{FeedError, FeedResult};
use crate::gateway::{NewPost, PostGateway, PostPatch, PostRecord};
use crate::id_gen;
use crate::notify::{Notifier, Toast};
use crate::post::{DeletePhase, Post};
use crate::time_utils;

/// Per-post staged-delete job. One entry per id, at most.
#[derive(Debug)]
struct DeleteJob {
    phase: DeletePhase,
    /// DOM/render height snapshot taken when the job started.
    height: f32,
    deadline: Instant,
}

/// Render parameters derived from the transient maps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationStyle {
    /// Frozen height during the pending phase; zero while collapsing.
    pub height: Option<f32>,
    pub opacity: Option<f32>,
    pub scale: Option<f32>,
    /// Collapsing also zeroes margins and padding.
    pub collapsed: bool,
    /// Entrance-highlight pulse for new/edited posts.
    pub highlight: bool,
}

pub struct FeedState {
    posts: Vec<Post>,
    username: Option<String>,
    /// Has the entrance animation fired for this post.
    visible: HashMap<i64, bool>,
    deleting: HashMap<i64, DeleteJob>,
    /// Rendered-height snapshots, fed by the render layer.
    heights: HashMap<i64, f32>,
    /// Post currently in its highlight window, with expiry.
    new_post: Option<(i64, Instant)>,
    /// Heart-beat pulses from recent like toggles, with expiry.
    like_pulse: HashMap<i64, Instant>,
    /// In-flight flags — the only backpressure on rapid resubmission.
    creating: bool,
    editing: bool,
    loaded: bool,
    gateway: Box<dyn PostGateway>,
    notifier: Box<dyn Notifier>,
    highlight_window: Duration,
    delete_stage: Duration,
    like_window: Duration,
}

impl FeedState {
    pub fn new(
        gateway: Box<dyn PostGateway>,
        notifier: Box<dyn Notifier>,
        username: Option<String>,
    ) -> Self {
        Self::with_timings(
            gateway,
            notifier,
            username,
            Duration::from_millis(HIGHLIGHT_WINDOW_MS),
            Duration::from_millis(DELETE_STAGE_MS),
        )
    }

    /// Timings come from configuration; `new` uses the compiled defaults.
    /// Deadlines are computed from these, so they must match whatever the
    /// caller uses to pace its `tick` loop.
    pub fn with_timings(
        gateway: Box<dyn PostGateway>,
        notifier: Box<dyn Notifier>,
        username: Option<String>,
        highlight_window: Duration,
        delete_stage: Duration,
    ) -> Self {
        Self {
            posts: Vec::new(),
            username,
            visible: HashMap::new(),
            deleting: HashMap::new(),
            heights: HashMap::new(),
            new_post: None,
            like_pulse: HashMap::new(),
            creating: false,
            editing: false,
            loaded: false,
            gateway,
            notifier,
            highlight_window,
            delete_stage,
            like_window: Duration::from_millis(LIKE_ANIMATION_MS),
        }
    }

    // ─── Load ───

    /// Replace the list with the remote collection, augmented with the
    /// client-local defaults. On failure the list stays empty — no retry.
    pub fn load(&mut self) {
        match self.gateway.list() {
            Ok(records) => {
                self.posts = records.into_iter().map(augment).collect();
                self.visible.clear();
                self.deleting.clear();
                self.heights.clear();
                self.like_pulse.clear();
                tracing::info!(count = self.posts.len(), "Feed loaded");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Feed load failed");
                self.posts.clear();
                self.notifier.notify(Toast::danger("An error occurred"));
            }
        }
        self.loaded = true;
    }

    // ─── Create ───

    /// Optimistic create: the provisional post is prepended before the
    /// gateway call and never rolled back. The server-assigned id is
    /// discarded — the local id stays authoritative for this session.
    pub fn create(&mut self, title: &str, content: &str, now: Instant) -> FeedResult<i64> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(FeedError::InvalidInput("title and content are required".into()));
        }
        if self.creating {
            return Err(FeedError::InvalidInput("a create is already in flight".into()));
        }
        self.creating = true;

        let username = self.author_name();
        let post = Post {
            id: id_gen::client_id(),
            username: username.clone(),
            title: title.to_string(),
            content: content.to_string(),
            created_datetime: time_utils::now(),
            author_ip: None,
            likes: 0,
            liked: false,
            comments: Vec::new(),
        };
        let id = post.id;
        self.posts.insert(0, post);
        // New posts skip the one-shot observer: entrance plays immediately.
        self.visible.insert(id, true);
        self.new_post = Some((id, now + self.highlight_window));

        let body = NewPost {
            username,
            title: title.to_string(),
            content: content.to_string(),
        };
        match self.gateway.create(&body) {
            Ok(record) => {
                tracing::info!(local_id = id, server_id = record.id, "Post created");
                self.notifier.notify(Toast::success("Post created!"));
            }
            Err(e) => {
                // The optimistic post stays; no rollback.
                tracing::warn!(local_id = id, error = %e, "Post create failed on server");
                self.notifier.notify(Toast::danger("An error occurred"));
            }
        }
        self.creating = false;
        Ok(id)
    }

    // ─── Edit ───

    /// Confirmed edit: local state changes only after the gateway accepts.
    /// Likes and comments are untouched either way.
    pub fn edit(&mut self, id: i64, title: &str, content: &str, now: Instant) -> FeedResult<()> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(FeedError::InvalidInput("title and content are required".into()));
        }
        if self.editing {
            return Err(FeedError::InvalidInput("an edit is already in flight".into()));
        }
        if !self.posts.iter().any(|p| p.id == id) {
            return Err(FeedError::PostNotFound(id));
        }
        self.editing = true;

        let patch = PostPatch {
            id,
            title: title.to_string(),
            content: content.to_string(),
        };
        match self.gateway.update(&patch) {
            Ok(_) => {
                if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
                    post.title = title.to_string();
                    post.content = content.to_string();
                }
                self.new_post = Some((id, now + self.highlight_window));
                tracing::info!(id, "Post edited");
                self.notifier.notify(Toast::success("Post edited!"));
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Post edit failed");
                self.notifier.notify(Toast::danger("An error occurred"));
            }
        }
        self.editing = false;
        Ok(())
    }

    // ─── Staged delete ───

    /// Start the three-phase removal. Success is reported immediately,
    /// before any network traffic — the remote result is never surfaced.
    /// A second call while a job exists is a no-op, so the gateway delete
    /// fires at most once per staging.
    pub fn delete(&mut self, id: i64, now: Instant) -> FeedResult<()> {
        if !self.posts.iter().any(|p| p.id == id) {
            return Err(FeedError::PostNotFound(id));
        }
        if self.deleting.contains_key(&id) {
            tracing::debug!(id, "Delete already staged, ignoring");
            return Ok(());
        }
        let height = self.heights.get(&id).copied().unwrap_or(0.0);
        self.deleting.insert(
            id,
            DeleteJob {
                phase: DeletePhase::Pending,
                height,
                deadline: now + self.delete_stage,
            },
        );
        self.notifier.notify(Toast::success("Post deleted!"));
        tracing::info!(id, "Delete staged");
        Ok(())
    }

    /// Advance every deadline-driven state: staged deletes and the
    /// highlight window. The only place timers resolve.
    pub fn tick(&mut self, now: Instant) {
        // Highlight expiry
        if let Some((_, deadline)) = self.new_post {
            if now >= deadline {
                self.new_post = None;
            }
        }

        // Heart-beat pulse expiry
        self.like_pulse.retain(|_, deadline| now < *deadline);

        // Pending → Collapsing: the remote delete fires at this transition,
        // fire-and-forget. Failures are logged and masked.
        let mut to_collapse = Vec::new();
        let mut to_remove = Vec::new();
        for (&id, job) in &self.deleting {
            if now < job.deadline {
                continue;
            }
            match job.phase {
                DeletePhase::Pending => to_collapse.push(id),
                DeletePhase::Collapsing => to_remove.push(id),
            }
        }

        for id in to_collapse {
            if let Some(job) = self.deleting.get_mut(&id) {
                job.phase = DeletePhase::Collapsing;
                job.deadline += self.delete_stage;
            }
            if let Err(e) = self.gateway.delete(id) {
                tracing::warn!(id, error = %e, "Remote delete failed (masked)");
            }
        }

        for id in to_remove {
            self.posts.retain(|p| p.id != id);
            self.deleting.remove(&id);
            self.visible.remove(&id);
            self.heights.remove(&id);
            self.like_pulse.remove(&id);
            if matches!(self.new_post, Some((nid, _)) if nid == id) {
                self.new_post = None;
            }
            tracing::info!(id, "Post removed from feed");
        }
    }

    // ─── Local-only mutations ───

    /// Toggle the local liked flag; never touches the gateway. Liking
    /// starts the heart-beat pulse; unliking cancels it.
    pub fn like(&mut self, id: i64, now: Instant) -> bool {
        match self.posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                if post.liked {
                    post.likes = post.likes.saturating_sub(1);
                    self.like_pulse.remove(&id);
                } else {
                    post.likes += 1;
                    self.like_pulse.insert(id, now + self.like_window);
                }
                post.liked = !post.liked;
                true
            }
            None => false,
        }
    }

    /// Append a client-local comment. Never persisted remotely.
    pub fn add_comment(&mut self, id: i64, text: &str) -> FeedResult<i64> {
        if text.trim().is_empty() {
            return Err(FeedError::InvalidInput("comment text is required".into()));
        }
        let username = self.author_name();
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FeedError::PostNotFound(id))?;
        let comment_id = id_gen::client_id();
        post.comments.push(crate::post::Comment {
            id: comment_id,
            username,
            content: text.to_string(),
            created_datetime: time_utils::now(),
        });
        Ok(comment_id)
    }

    // ─── Queries ───

    /// Pure filter over the full list; never mutates it.
    pub fn filtered(&self, query: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.matches(query)).collect()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_visible(&self, id: i64) -> bool {
        self.visible.get(&id).copied().unwrap_or(false)
    }

    /// One-shot entrance: called by the visibility tracker on first
    /// threshold crossing.
    pub fn mark_visible(&mut self, id: i64) {
        self.visible.insert(id, true);
    }

    /// Render layer feeds measured heights here so a later staged delete
    /// can animate from a known height.
    pub fn record_height(&mut self, id: i64, height: f32) {
        self.heights.insert(id, height);
    }

    pub fn delete_phase(&self, id: i64) -> Option<DeletePhase> {
        self.deleting.get(&id).map(|j| j.phase)
    }

    pub fn is_highlighted(&self, id: i64) -> bool {
        matches!(self.new_post, Some((nid, _)) if nid == id)
    }

    /// Heart-beat pulse still running for this post's like button.
    pub fn is_like_pulsing(&self, id: i64) -> bool {
        self.like_pulse.contains_key(&id)
    }

    /// Render parameters for a post given its transient state.
    pub fn animation_style(&self, id: i64) -> AnimationStyle {
        if let Some(job) = self.deleting.get(&id) {
            return match job.phase {
                DeletePhase::Collapsing => AnimationStyle {
                    height: Some(0.0),
                    opacity: Some(0.0),
                    collapsed: true,
                    ..Default::default()
                },
                DeletePhase::Pending => AnimationStyle {
                    height: Some(job.height),
                    opacity: Some(0.0),
                    scale: Some(0.95),
                    ..Default::default()
                },
            };
        }
        if self.is_highlighted(id) {
            return AnimationStyle {
                highlight: true,
                ..Default::default()
            };
        }
        AnimationStyle::default()
    }

    fn author_name(&self) -> String {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(ANONYMOUS_USERNAME)
            .to_string()
    }
}

/// Augment a wire record with the client-local defaults.
fn augment(record: PostRecord) -> Post {
    Post {
        id: record.id,
        username: record.username,
        title: record.title,
        content: record.content,
        created_datetime: record.created_datetime,
        author_ip: record.author_ip,
        likes: 0,
        liked: false,
        comments: Vec::new(),
    }
}
