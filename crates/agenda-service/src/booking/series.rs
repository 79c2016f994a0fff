//! Partitioning of sessions into logical series.

use std::collections::HashMap;
use std::fmt;

use agenda_core::model::{Session, clock};
use chrono::NaiveDate;
use serde::Serialize;

/// ## Summary
/// Identity of a series.
///
/// Sessions created together share a persisted series id. Sessions without
/// one fall back to a key built from the client, category, times and location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GroupKey {
    Series(uuid::Uuid),
    Heuristic(String),
}

impl GroupKey {
    #[must_use]
    pub fn of(session: &Session) -> Self {
        if let Some(series_id) = session.series_id {
            return Self::Series(series_id);
        }
        let details = &session.details;
        Self::Heuristic(format!(
            "{}|{}|{}|{}|{}",
            details.client,
            details.category,
            clock::format(details.start),
            details.end.map(clock::format).unwrap_or_default(),
            details.location,
        ))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series(id) => write!(f, "series:{id}"),
            Self::Heuristic(key) => f.write_str(key),
        }
    }
}

/// A series with its members in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesGroup {
    pub key: GroupKey,
    pub members: Vec<Session>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub count: usize,
}

impl SeriesGroup {
    fn from_members(key: GroupKey, mut members: Vec<Session>) -> Option<Self> {
        members.sort_by_key(|session| (session.details.date, session.details.start));
        let first_date = members.first()?.date();
        let last_date = members.last()?.date();
        Some(Self {
            key,
            count: members.len(),
            members,
            first_date,
            last_date,
        })
    }

    #[must_use]
    pub fn ids(&self) -> Vec<uuid::Uuid> {
        self.members.iter().map(|session| session.id).collect()
    }
}

/// ## Summary
/// Groups sessions by [`GroupKey`].
///
/// Groups come out ordered by their first date; groups starting on the same
/// date keep the order in which their first member appeared in the input.
#[must_use]
pub fn group_sessions(sessions: &[Session]) -> Vec<SeriesGroup> {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut buckets: HashMap<GroupKey, Vec<Session>> = HashMap::new();
    for session in sessions {
        let key = GroupKey::of(session);
        buckets
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(session.clone());
    }

    let mut groups: Vec<SeriesGroup> = order
        .into_iter()
        .filter_map(|key| {
            let members = buckets.remove(&key)?;
            SeriesGroup::from_members(key, members)
        })
        .collect();
    groups.sort_by_key(|group| group.first_date);
    groups
}

/// The group the session `id` belongs to, or `None` when it is not in `sessions`.
#[must_use]
pub fn group_of(sessions: &[Session], id: uuid::Uuid) -> Option<SeriesGroup> {
    let target = sessions.iter().find(|session| session.id == id)?;
    let key = GroupKey::of(target);
    let members = sessions
        .iter()
        .filter(|session| GroupKey::of(session) == key)
        .cloned()
        .collect();
    SeriesGroup::from_members(key, members)
}
