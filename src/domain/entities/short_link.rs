//! Short link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted mapping from a short hash to a destination URL.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub id: Uuid,
    pub long_url: String,
    pub hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub id: Uuid,
    pub long_url: String,
    pub hash: String,
    pub user_id: Uuid,
}

impl NewShortLink {
    /// Returns a copy of this record with a different hash, keeping the id.
    pub fn with_hash(&self, hash: String) -> Self {
        Self {
            hash,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_hash_keeps_identity() {
        let new_link = NewShortLink {
            id: Uuid::new_v4(),
            long_url: "https://example.com".to_string(),
            hash: "aaaaaaa".to_string(),
            user_id: Uuid::new_v4(),
        };

        let retried = new_link.with_hash("bbbbbbb".to_string());

        assert_eq!(retried.id, new_link.id);
        assert_eq!(retried.user_id, new_link.user_id);
        assert_eq!(retried.long_url, new_link.long_url);
        assert_eq!(retried.hash, "bbbbbbb");
    }
}
