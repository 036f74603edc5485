use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post in the in-memory feed. `likes`, `liked` and `comments` exist only
/// in this client session — the remote service has no such fields, so a
/// reload discards them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub username: String,
    pub title: String,
    pub content: String,
    pub created_datetime: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_ip: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Owned exclusively by its parent post, no independent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub username: String,
    pub content: String,
    pub created_datetime: DateTime<Utc>,
}

/// Staged-delete phase. Absence of an entry means the post is not deleting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeletePhase {
    /// Height snapshotted, post frozen in place, fading.
    Pending,
    /// Collapsing to zero height; the remote delete has been issued.
    Collapsing,
}

impl DeletePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Collapsing => "collapsing",
        }
    }
}

impl std::fmt::Display for DeletePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Post {
    /// Predicat de recherche: sous-chaine insensible a la casse sur le
    /// titre OU le contenu. Une requete vide matche tout.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q) || self.content.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, content: &str) -> Post {
        Post {
            id: 1,
            username: "ana".into(),
            title: title.into(),
            content: content.into(),
            created_datetime: Utc::now(),
            author_ip: None,
            likes: 0,
            liked: false,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_matches_case_insensitive() {
        let p = post("Hello World", "first post");
        assert!(p.matches("hello"));
        assert!(p.matches("WORLD"));
        assert!(p.matches("FIRST"));
        assert!(!p.matches("absent"));
    }

    #[test]
    fn test_matches_empty_query() {
        let p = post("Hi", "Bye");
        assert!(p.matches(""));
    }

    #[test]
    fn test_delete_phase_display() {
        assert_eq!(DeletePhase::Pending.to_string(), "pending");
        assert_eq!(DeletePhase::Collapsing.to_string(), "collapsing");
    }
}
