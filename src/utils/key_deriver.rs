//! Deterministic short key derivation.
//!
//! A key is the prefix of the URL-safe, unpadded base64 encoding of
//! `SHA-256(original_url ‖ 0x1F ‖ owner_id)`. The same pair always yields the
//! same key, with no randomness and no hidden state.
//!
//! Truncation makes keys short but lets different pairs collide. Collisions
//! are not detected here: callers try further candidates with
//! [`KeyDeriver::derive_with_attempt`].

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Default key length in characters.
pub const DEFAULT_KEY_LENGTH: usize = 7;

/// Shortest and longest configurable key lengths.
pub const MIN_KEY_LENGTH: usize = 4;
pub const MAX_KEY_LENGTH: usize = 16;

/// Separator between hashed fields. Keeps `("ab", "c")` and `("a", "bc")` apart.
const FIELD_SEPARATOR: u8 = 0x1F;

/// Derives fixed-length keys from `(original_url, owner_id)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDeriver {
    length: usize,
}

impl KeyDeriver {
    /// Creates a deriver producing keys of `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `length` is outside
    /// [`MIN_KEY_LENGTH`]..=[`MAX_KEY_LENGTH`].
    pub fn new(length: usize) -> Result<Self, AppError> {
        if !(MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&length) {
            return Err(AppError::bad_request(
                format!("Key length must be {MIN_KEY_LENGTH}-{MAX_KEY_LENGTH} characters"),
                json!({ "length": length }),
            ));
        }

        Ok(Self { length })
    }

    pub fn key_length(&self) -> usize {
        self.length
    }

    /// Derives the primary key for a pair.
    pub fn derive(&self, original_url: &str, owner_id: &str) -> String {
        self.derive_with_attempt(original_url, owner_id, 0)
    }

    /// Derives the candidate key for a given collision attempt.
    ///
    /// Attempt `0` is [`Self::derive`]. Later attempts append the attempt
    /// number to the hashed input, so every candidate is still a pure function
    /// of its inputs.
    pub fn derive_with_attempt(&self, original_url: &str, owner_id: &str, attempt: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(original_url.as_bytes());
        hasher.update([FIELD_SEPARATOR]);
        hasher.update(owner_id.as_bytes());
        if attempt > 0 {
            hasher.update([FIELD_SEPARATOR]);
            hasher.update(attempt.to_be_bytes());
        }

        let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize());
        encoded[..self.length].to_string()
    }
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self {
            length: DEFAULT_KEY_LENGTH,
        }
    }
}
