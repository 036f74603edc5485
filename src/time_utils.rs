use chrono::{DateTime, Utc};

/// Retourne le timestamp courant en UTC
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Formate un timestamp ISO 8601 pour la persistance JSON
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse un timestamp ISO 8601
pub fn from_rfc3339(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    s.parse::<DateTime<Utc>>()
}

/// Human-readable age like "3m ago" / "2h ago" for the feed view.
pub fn distance_to_now(dt: &DateTime<Utc>) -> String {
    let secs = (Utc::now() - *dt).num_seconds().max(0);
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dt = now();
        let s = to_rfc3339(&dt);
        let parsed = from_rfc3339(&s).unwrap();
        assert_eq!(dt.timestamp(), parsed.timestamp());
    }

    #[test]
    fn test_distance_to_now() {
        let dt = Utc::now() - chrono::Duration::minutes(5);
        assert_eq!(distance_to_now(&dt), "5m ago");
        let dt = Utc::now() - chrono::Duration::hours(3);
        assert_eq!(distance_to_now(&dt), "3h ago");
    }
}
