//! Confidence normalization for raw similarity scores
//!
//! Raw similarity from the vector index is the only signal; additive
//! boosts (keyword overlap, recency) are unbounded and not comparable
//! across queries, so none are applied here.

/// Clamp a raw similarity score into [0.0, 1.0].
///
/// The backend's output range is not guaranteed; scores below zero or
/// above one from a misbehaving backend are clamped rather than trusted.
/// NaN maps to 0.0 so confidence stays totally ordered.
pub fn confidence(raw_similarity: f32) -> f32 {
    if raw_similarity.is_nan() {
        return 0.0;
    }
    raw_similarity.clamp(0.0, 1.0)
}
