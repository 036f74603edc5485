//! CodeLeap Feed — terminal client for the CodeLeap Network.
//!
//! Single-crate library: session guard, feed state machine, remote post
//! gateway, visibility tracker and scroll-linked header, consumed by the
//! CLI binary.

// Foundation
pub mod constants;
pub mod error;
pub mod id_gen;
pub mod paths;
pub mod time_utils;

// Core
pub mod auth;
pub mod config;
pub mod feed;
pub mod gateway;
pub mod notify;
pub mod post;
pub mod profile;
pub mod routes;
pub mod session;

// Render-state derivations
pub mod header;
pub mod visibility;

pub mod tracing_init;

// Re-exports for convenience
pub use error::{FeedError, FeedResult};
