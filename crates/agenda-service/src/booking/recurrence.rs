//! Expansion of a recurring booking request into dated instances.

use agenda_core::config::{BookingConfig, OccurrenceBudget};
use agenda_core::model::{RecurrenceUnit, Session, SessionDetails, SessionDraft};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::conflict::find_conflict;

/// Attempt ceiling for the `accepted` budget, as a multiple of the maximum.
const ACCEPTED_ATTEMPT_FACTOR: u32 = 10;

/// ## Summary
/// Moves `date` forward by `n` units.
///
/// Months and years roll over instead of clamping: a day missing from the
/// target month spills into the next one, so 2025-01-31 plus one month is
/// 2025-03-03 and 2024-02-29 plus one year is 2025-03-01.
///
/// Returns `None` when the result leaves chrono's representable range.
#[must_use]
pub fn add_step(date: NaiveDate, unit: RecurrenceUnit, n: u32) -> Option<NaiveDate> {
    match unit {
        RecurrenceUnit::Daily => date.checked_add_days(Days::new(u64::from(n))),
        RecurrenceUnit::Weekly => date.checked_add_days(Days::new(u64::from(n) * 7)),
        RecurrenceUnit::Monthly => add_months_rolling(date, i64::from(n)),
        RecurrenceUnit::Yearly => add_months_rolling(date, i64::from(n) * 12),
    }
}

fn add_months_rolling(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month0 = u32::try_from(total.rem_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)?
        .checked_add_days(Days::new(u64::from(date.day0())))
}

/// Knobs of the expander that come from configuration rather than the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Maximum used when the rule does not set one.
    pub default_max: u32,
    /// Hard cap on the instances of one expansion, whatever the rule says.
    pub limit: u32,
    pub budget: OccurrenceBudget,
}

impl From<&BookingConfig> for ExpandOptions {
    fn from(config: &BookingConfig) -> Self {
        Self {
            default_max: config.default_max_occurrences,
            limit: config.max_occurrences_limit,
            budget: config.occurrence_budget,
        }
    }
}

/// What a skipped date collided with.
///
/// Generated dates strictly increase and conflicts need equal dates, so an
/// expansion never collides with its own instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Collision {
    /// A stored session, by id.
    Existing(uuid::Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedDate {
    pub date: NaiveDate,
    pub collision: Collision,
}

/// ## Summary
/// Output of [`expand`]: the accepted instances in date order, the seed first,
/// plus every date that was dropped because of a collision.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expansion {
    pub instances: Vec<SessionDetails>,
    pub skipped: Vec<SkippedDate>,
}

/// ## Summary
/// Expands a seed into its instances.
///
/// The seed itself is always the first instance; it is the caller's job to
/// check it for conflicts. Each following date is derived from the previous
/// one with [`add_step`] and stops past the inclusive end date. A date that
/// collides with `existing` is skipped. The maximum never exceeds
/// `options.limit`, including for rules bounded only by an end date.
///
/// Under [`OccurrenceBudget::Attempts`] skipped dates consume the maximum,
/// so conflicts shrink the series. Under [`OccurrenceBudget::Accepted`] only
/// accepted instances do, bounded by ten attempts per allowed occurrence.
#[must_use]
#[tracing::instrument(skip(seed, existing), fields(date = %seed.details.date, rule = ?seed.recurrence))]
pub fn expand(seed: &SessionDraft, existing: &[Session], options: ExpandOptions) -> Expansion {
    let mut expansion = Expansion {
        instances: vec![seed.details.clone()],
        skipped: Vec::new(),
    };
    let Some(rule) = seed.recurrence else {
        return expansion;
    };

    let max = rule
        .max_occurrences
        .unwrap_or(options.default_max)
        .min(options.limit)
        .max(1);
    let attempt_ceiling = max.saturating_mul(ACCEPTED_ATTEMPT_FACTOR);
    let mut counter: u32 = 1;
    let mut attempts: u32 = 0;
    let mut cursor = seed.details.date;

    while counter < max {
        if options.budget == OccurrenceBudget::Accepted && attempts >= attempt_ceiling {
            tracing::warn!(attempts, accepted = counter, "Attempt ceiling reached");
            break;
        }
        attempts += 1;

        let Some(next) = add_step(cursor, rule.unit, rule.step) else {
            break;
        };
        cursor = next;
        if rule.until.is_some_and(|until| cursor > until) {
            break;
        }

        let candidate = seed.details.on_date(cursor);
        let collision =
            find_conflict(&candidate, existing, None).map(|session| Collision::Existing(session.id));

        match collision {
            Some(collision) => {
                tracing::debug!(date = %cursor, ?collision, "Skipping colliding date");
                expansion.skipped.push(SkippedDate {
                    date: cursor,
                    collision,
                });
                if options.budget == OccurrenceBudget::Attempts {
                    counter += 1;
                }
            }
            None => {
                expansion.instances.push(candidate);
                counter += 1;
            }
        }
    }

    tracing::debug!(
        instances = expansion.instances.len(),
        skipped = expansion.skipped.len(),
        "Expansion finished"
    );
    expansion
}
