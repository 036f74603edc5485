//! Genere les identifiants cote client (posts optimistes, commentaires).
//!
//! Le service distant assigne ses propres ids; les entrees optimistes
//! utilisent le timestamp courant en millisecondes.
//! Un bump monotone garantit l'unicite quand deux appels tombent dans
//! la meme milliseconde.

use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Client-generated id: current UNIX time in ms, bumped past the last
/// issued id when the clock has not advanced.
pub fn client_id() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = if now > last { now } else { last + 1 };
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = client_id();
        let b = client_id();
        let c = client_id();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let a = client_id();
        let b = client_id();
        assert!(b > a);
    }
}
