//! Double-booking detection for a single client.

use agenda_core::model::{Session, SessionDetails};

/// ## Summary
/// Whether two bookings collide.
///
/// Only bookings of the same client on the same calendar date are compared.
/// When both carry an end time the half-open intervals `[start, end)` must
/// intersect, so back-to-back sessions do not collide. Otherwise only an
/// identical start time counts as a collision.
#[must_use]
pub fn overlaps(candidate: &SessionDetails, existing: &SessionDetails) -> bool {
    if candidate.date != existing.date || !candidate.client.same_client(&existing.client) {
        return false;
    }
    match (candidate.end, existing.end) {
        (Some(candidate_end), Some(existing_end)) => {
            candidate.start < existing_end && candidate_end > existing.start
        }
        _ => candidate.start == existing.start,
    }
}

/// ## Summary
/// First session in `existing` that collides with `candidate`.
///
/// `ignore_id` is skipped so that a record being edited never collides with
/// its own stored version.
#[must_use]
pub fn find_conflict<'a>(
    candidate: &SessionDetails,
    existing: &'a [Session],
    ignore_id: Option<uuid::Uuid>,
) -> Option<&'a Session> {
    existing
        .iter()
        .filter(|session| Some(session.id) != ignore_id)
        .find(|session| overlaps(candidate, &session.details))
}
