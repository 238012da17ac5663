//! Multi-tenant document visibility policy
//!
//! `is_visible` is the single access-control chokepoint. Every code path
//! that returns passages, including the degraded search path, filters
//! through this function; fallback branches never re-implement the rules.

use chrono::{DateTime, Utc};

use crate::types::{Document, DocumentStatus, Visibility};

/// Decide whether `document` is visible to a requester from `requester_org_id`.
///
/// Total and side-effect-free. Rules, in order:
/// 1. Only `Completed` documents are visible.
/// 2. An expired document is not visible.
/// 3. `Public` documents are visible to everyone.
/// 4. `Internal` documents are visible only to the owning organization.
/// 5. `Shared` documents are visible to the organizations in `shared_with`;
///    an unset `shared_with` means shared with every organization.
pub fn is_visible(document: &Document, requester_org_id: &str, now: DateTime<Utc>) -> bool {
    if document.status != DocumentStatus::Completed {
        return false;
    }

    if let Some(expires_at) = document.expires_at {
        if expires_at <= now {
            return false;
        }
    }

    match document.visibility {
        Visibility::Public => true,
        Visibility::Internal => document.org_id == requester_org_id,
        Visibility::Shared => match &document.shared_with {
            None => true,
            Some(orgs) => orgs.iter().any(|org| org == requester_org_id),
        },
    }
}
