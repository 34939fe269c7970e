//! Selection of the best search candidate for an extracted title.

use crate::catalog::{ContentType, SearchCandidate};

/// Pick the first candidate of the wanted content type, else the first
/// candidate. The service's relevance order is the tie-break.
pub fn select_best_match(
    candidates: &[SearchCandidate],
    wanted: ContentType,
) -> Option<&SearchCandidate> {
    candidates
        .iter()
        .find(|c| c.content_type == wanted)
        .or_else(|| candidates.first())
}
