//! Session guard — gates the feed view behind the identity provider.
//!
//! Trois etats: Unknown (verification en cours), Authenticated,
//! Unauthenticated. Tant que l'etat est Unknown, aucune decision de
//! redirection n'est prise (pas de flash de la mauvaise vue).

use crate::auth::Principal;
use crate::error::FeedError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Initial session check still in flight.
    Unknown,
    Authenticated(Principal),
    Unauthenticated,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

#[derive(Debug)]
pub struct SessionGuard {
    status: SessionStatus,
    /// Error text from a failed session check, shown on the sign-in view.
    last_error: Option<String>,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGuard {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Unknown,
            last_error: None,
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated(_))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Feed the outcome of the initial session query.
    pub fn resolve(&mut self, result: Result<Option<Principal>, FeedError>) {
        match result {
            Ok(Some(principal)) => {
                tracing::debug!(user = %principal.email, "Session resolved: authenticated");
                self.status = SessionStatus::Authenticated(principal);
                self.last_error = None;
            }
            Ok(None) => {
                self.status = SessionStatus::Unauthenticated;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed");
                self.status = SessionStatus::Unauthenticated;
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Any later auth-state-change event from the provider (magic-link
    /// completion in another tab, sign-out elsewhere).
    pub fn on_auth_change(&mut self, principal: Option<Principal>) {
        self.status = match principal {
            Some(p) => SessionStatus::Authenticated(p),
            None => SessionStatus::Unauthenticated,
        };
    }
}
