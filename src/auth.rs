//! Identity-provider client — magic-link flow, session query, sign-out.
//!
//! The provider owns authentication end to end: we request a one-time
//! sign-in link bound to an email and a redirect URL carrying the encoded
//! username, then exchange the redirect for a stored access token.
//! The token lives in `{data_dir}/session.json`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};

/// Provider-issued principal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub email: String,
}

/// Session token as stored locally (the provider's "local storage").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub stored_at: String,
}

const SESSION_FILE: &str = "session.json";

impl StoredSession {
    pub fn new(access_token: &str) -> Self {
        Self {
            access_token: access_token.to_string(),
            stored_at: crate::time_utils::now().to_rfc3339(),
        }
    }

    /// Load the stored session, or None if absent/corrupted.
    pub fn load(data_dir: &Path) -> Option<Self> {
        let path = data_dir.join(SESSION_FILE);
        let content = std::fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Best-effort save.
    pub fn save(&self, data_dir: &Path) {
        if let Err(e) = std::fs::create_dir_all(data_dir) {
            tracing::warn!(error = %e, "Failed to create data dir for session");
            return;
        }
        let path = data_dir.join(SESSION_FILE);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!(error = %e, "Failed to write session.json");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session"),
        }
    }

    pub fn clear(data_dir: &Path) {
        let _ = std::fs::remove_file(data_dir.join(SESSION_FILE));
    }
}

pub struct AuthClient {
    agent: ureq::Agent,
    base_url: String,
    redirect_url: String,
    data_dir: std::path::PathBuf,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: String,
}

impl AuthClient {
    pub fn new(base_url: &str, redirect_url: &str, data_dir: &Path, timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            redirect_url: redirect_url.to_string(),
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Request a one-time sign-in link for `email`. The redirect URL carries
    /// the percent-encoded username so the callback view can persist it.
    pub fn sign_in_with_magic_link(&self, email: &str, username: &str) -> FeedResult<()> {
        if username.trim().is_empty() {
            return Err(FeedError::InvalidInput("username is required".into()));
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(FeedError::InvalidInput("a valid email is required".into()));
        }
        let redirect_to = format!("{}?username={}", self.redirect_url, encode_component(username));
        let body = serde_json::json!({
            "email": email,
            "create_user": true,
            "redirect_to": redirect_to,
        });
        self.agent
            .post(&format!("{}/otp", self.base_url))
            .send_json(&body)
            .map_err(|e| FeedError::Auth(e.to_string()))?;
        tracing::info!(email, "Magic link requested");
        Ok(())
    }

    /// Query the provider for the current session. `Ok(None)` means no
    /// stored token (plain unauthenticated, not an error).
    pub fn get_session(&self) -> FeedResult<Option<Principal>> {
        let session = match StoredSession::load(&self.data_dir) {
            Some(s) => s,
            None => return Ok(None),
        };
        let mut res = self
            .agent
            .get(&format!("{}/user", self.base_url))
            .header("Authorization", &format!("Bearer {}", session.access_token))
            .call()
            .map_err(|e| FeedError::SessionCheck(e.to_string()))?;
        let user: UserResponse = res
            .body_mut()
            .read_json()
            .map_err(|e| FeedError::SessionCheck(e.to_string()))?;
        Ok(Some(Principal {
            id: user.id,
            email: user.email,
        }))
    }

    /// Consume the emailed redirect: persist the access token from the URL
    /// fragment and return the username from the query, if present.
    pub fn complete_callback(&self, redirect: &str) -> FeedResult<Option<String>> {
        let token = fragment_param(redirect, "access_token")
            .ok_or_else(|| FeedError::Auth("redirect URL carries no access token".into()))?;
        StoredSession::new(&token).save(&self.data_dir);
        Ok(query_param(redirect, "username").map(|u| decode_component(&u)))
    }

    /// Sign out: best-effort provider call, then drop the local token.
    /// The caller clears the cached username alongside.
    pub fn sign_out(&self) -> FeedResult<()> {
        if let Some(session) = StoredSession::load(&self.data_dir) {
            let result = self
                .agent
                .post(&format!("{}/logout", self.base_url))
                .header("Authorization", &format!("Bearer {}", session.access_token))
                .send_json(&serde_json::json!({}));
            if let Err(e) = result {
                tracing::warn!(error = %e, "Provider logout failed, clearing local session anyway");
            }
        }
        StoredSession::clear(&self.data_dir);
        tracing::info!("Signed out");
        Ok(())
    }
}

// ─── URL helpers ───

/// Percent-encode a query component (unreserved chars pass through).
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Decode a percent-encoded component; malformed sequences pass through.
pub fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(h), Some(l)) = (
                bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
            ) {
                out.push((h * 16 + l) as u8);
                i += 3;
                continue;
            }
        }
        if bytes[i] == b'+' {
            out.push(b' ');
        } else {
            out.push(bytes[i]);
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Extract a raw value from a `a=b&c=d` pair list.
pub fn param_in(pairs: &str, key: &str) -> Option<String> {
    pairs.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.to_string())
    })
}

/// Extract a raw value from the query string (`?a=b&c=d`).
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let after = url.split_once('?')?.1;
    let query = after.split('#').next().unwrap_or(after);
    param_in(query, key)
}

/// Extract a raw value from the fragment (`#a=b&c=d`), where identity
/// providers place tokens so they never reach the server.
pub fn fragment_param(url: &str, key: &str) -> Option<String> {
    let fragment = url.split_once('#')?.1;
    param_in(fragment, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = "John Doe & Søn";
        let encoded = encode_component(original);
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('&'));
        assert_eq!(decode_component(&encoded), original);
    }

    #[test]
    fn test_encode_unreserved_passthrough() {
        assert_eq!(encode_component("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }

    #[test]
    fn test_query_and_fragment_params() {
        let url = "https://app.example/auth/callback?username=John%20Doe&x=1#access_token=tok123&type=magiclink";
        assert_eq!(query_param(url, "username").as_deref(), Some("John%20Doe"));
        assert_eq!(query_param(url, "x").as_deref(), Some("1"));
        assert!(query_param(url, "access_token").is_none());
        assert_eq!(fragment_param(url, "access_token").as_deref(), Some("tok123"));
        assert!(fragment_param(url, "username").is_none());
    }

    #[test]
    fn test_stored_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StoredSession::load(dir.path()).is_none());
        StoredSession::new("tok").save(dir.path());
        let loaded = StoredSession::load(dir.path()).unwrap();
        assert_eq!(loaded.access_token, "tok");
        StoredSession::clear(dir.path());
        assert!(StoredSession::load(dir.path()).is_none());
    }

    #[test]
    fn test_complete_callback_persists_token_and_returns_username() {
        let dir = tempfile::tempdir().unwrap();
        let client = AuthClient::new(
            "https://auth.example/v1",
            "https://app.example/auth/callback",
            dir.path(),
            Duration::from_secs(1),
        );
        let username = client
            .complete_callback(
                "https://app.example/auth/callback?username=John%20Doe#access_token=tok9",
            )
            .unwrap();
        assert_eq!(username.as_deref(), Some("John Doe"));
        assert_eq!(StoredSession::load(dir.path()).unwrap().access_token, "tok9");
    }

    #[test]
    fn test_complete_callback_without_token_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = AuthClient::new(
            "https://auth.example/v1",
            "https://app.example/auth/callback",
            dir.path(),
            Duration::from_secs(1),
        );
        assert!(client
            .complete_callback("https://app.example/auth/callback?username=x")
            .is_err());
    }

    #[test]
    fn test_get_session_without_token_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let client = AuthClient::new(
            "https://auth.example/v1",
            "https://app.example/auth/callback",
            dir.path(),
            Duration::from_secs(1),
        );
        assert!(client.get_session().unwrap().is_none());
    }

    #[test]
    fn test_sign_in_validates_input() {
        let dir = tempfile::tempdir().unwrap();
        let client = AuthClient::new(
            "https://auth.example/v1",
            "https://app.example/auth/callback",
            dir.path(),
            Duration::from_secs(1),
        );
        assert!(client.sign_in_with_magic_link("a@b.c", " ").is_err());
        assert!(client.sign_in_with_magic_link("not-an-email", "ana").is_err());
    }
}
