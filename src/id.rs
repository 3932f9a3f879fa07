//! Task id generation.

use ulid::Ulid;

/// Generate an opaque task id: a ULID, 48 bits of milliseconds since the
/// epoch followed by 80 random bits, in Crockford base32. Collisions are
/// improbable, not impossible.
pub fn generate_id() -> String {
    Ulid::new().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_distinct_within_a_session() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_lead_with_the_creation_time() {
        let before = chrono::Utc::now().timestamp_millis() as u64;
        let id = generate_id();
        let after = chrono::Utc::now().timestamp_millis() as u64;
        assert_eq!(id.len(), 26);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        let millis = id.parse::<Ulid>().unwrap().timestamp_ms();
        assert!((before..=after).contains(&millis));
    }
}
