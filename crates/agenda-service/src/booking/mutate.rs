//! Scope-limited edits and deletes over a series.

use agenda_core::model::{Session, SessionDraft};
use serde::{Deserialize, Serialize};

use super::conflict::find_conflict;
use super::recurrence::{ExpandOptions, SkippedDate, expand};
use super::series::group_of;
use crate::error::{ServiceError, ServiceResult};

/// How far an edit reaches into the target's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditScope {
    OnlyThis,
    ThisAndFuture,
}

/// How far a delete reaches into the target's series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteScope {
    #[default]
    Single,
    #[serde(rename = "next")]
    NextOccurrence,
    #[serde(rename = "all")]
    WholeSeries,
}

/// ## Summary
/// Writes that replace the open tail of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailRewrite {
    pub removed: Vec<uuid::Uuid>,
    pub inserted: Vec<Session>,
    pub skipped: Vec<SkippedDate>,
}

/// ## Summary
/// Plans a this-and-future edit of `target`.
///
/// Every member of the target's group that is not completed and falls on or
/// after the new seed date is removed, along with the target itself unless it
/// is completed. The seed is then expanded against whatever remains. The new
/// instances keep the target's series id; one is minted when the target had
/// none and the seed yields more than one instance.
///
/// ## Errors
/// Returns `ServiceError::Conflict` when the seed date itself collides with a
/// remaining session of the client. Nothing has been written at that point.
#[tracing::instrument(skip(target, seed, sessions), fields(target_id = %target.id, new_date = %seed.details.date))]
pub fn plan_this_and_future(
    target: &Session,
    seed: &SessionDraft,
    sessions: &[Session],
    options: ExpandOptions,
) -> ServiceResult<TailRewrite> {
    let new_date = seed.details.date;
    let members = group_of(sessions, target.id).map_or_else(|| vec![target.clone()], |g| g.members);

    let removed: Vec<uuid::Uuid> = members
        .iter()
        .filter(|member| !member.is_completed())
        .filter(|member| member.id == target.id || member.date() >= new_date)
        .map(|member| member.id)
        .collect();
    let remaining: Vec<Session> = sessions
        .iter()
        .filter(|session| !removed.contains(&session.id))
        .cloned()
        .collect();

    if let Some(existing) = find_conflict(&seed.details, &remaining, None) {
        return Err(ServiceError::conflict(existing));
    }

    let expansion = expand(seed, &remaining, options);
    let series_id = target
        .series_id
        .or_else(|| (expansion.instances.len() > 1).then(uuid::Uuid::now_v7));
    let inserted = expansion
        .instances
        .into_iter()
        .map(|details| Session::new(target.owner_id, details, series_id))
        .collect();

    tracing::debug!(removed = removed.len(), "Planned tail rewrite");
    Ok(TailRewrite {
        removed,
        inserted,
        skipped: expansion.skipped,
    })
}

/// ## Summary
/// Ids removed by a scoped delete of `target`.
///
/// `NextOccurrence` removes the earliest member of the target's group, which is
/// not necessarily the target itself.
#[must_use]
pub fn plan_delete(target: &Session, sessions: &[Session], scope: DeleteScope) -> Vec<uuid::Uuid> {
    let group = group_of(sessions, target.id);
    match (scope, group) {
        (DeleteScope::Single, _) | (_, None) => vec![target.id],
        (DeleteScope::NextOccurrence, Some(group)) => group
            .members
            .first()
            .map_or_else(|| vec![target.id], |first| vec![first.id]),
        (DeleteScope::WholeSeries, Some(group)) => group.ids(),
    }
}
