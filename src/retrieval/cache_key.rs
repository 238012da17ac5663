//! Deterministic cache key construction
//!
//! The key covers everything that changes a result: normalized query text,
//! requester identity, result size, and the external-content flag. Fields
//! are length-delimited before hashing so no two field sequences collide.

use sha2::{Digest, Sha256};

use crate::types::RequesterIdentity;

/// Compute the cache key for a retrieval request
pub fn compute_cache_key(
    query: &str,
    requester: &RequesterIdentity,
    k: usize,
    include_external: bool,
) -> String {
    let normalized = normalize_query(query);
    let k_field = k.to_string();
    let external_field = if include_external { "1" } else { "0" };

    let fields = [
        normalized.as_str(),
        requester.user_id.as_str(),
        requester.org_id.as_str(),
        k_field.as_str(),
        external_field,
    ];

    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// Normalize query text: trim, lowercase, collapse internal whitespace
fn normalize_query(query: &str) -> String {
    query
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
