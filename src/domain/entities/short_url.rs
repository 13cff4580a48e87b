//! Short URL entity: the durable key → original URL record.

use chrono::{DateTime, Utc};

/// A shortened URL record.
///
/// At most one record exists per `(original_url, owner_id)` pair and `key` is
/// unique across all records. Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub key: String,
    pub original_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        key: String,
        original_url: String,
        owner_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key,
            original_url,
            owner_id,
            created_at,
        }
    }

    /// Returns true if this record maps the given pair.
    pub fn is_pair(&self, original_url: &str, owner_id: &str) -> bool {
        self.original_url == original_url && self.owner_id == owner_id
    }
}

/// Input data for inserting a new record. `created_at` is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub key: String,
    pub original_url: String,
    pub owner_id: String,
}
