use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// Calendar unit a recurrence rule steps by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceUnit {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for RecurrenceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Repetition of a booking: every `step` units, until `until` (inclusive)
/// and/or for at most `max_occurrences` dates counting the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub unit: RecurrenceUnit,
    #[serde(default = "default_step")]
    pub step: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_occurrences: Option<u32>,
}

const fn default_step() -> u32 {
    1
}

impl RecurrenceRule {
    #[must_use]
    pub const fn new(unit: RecurrenceUnit, step: u32) -> Self {
        Self {
            unit,
            step,
            until: None,
            max_occurrences: None,
        }
    }

    #[must_use]
    pub const fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub const fn max_occurrences(mut self, max: u32) -> Self {
        self.max_occurrences = Some(max);
        self
    }

    /// Appends rule errors under the `recurrence.*` field names.
    pub fn check(&self, errors: &mut ValidationErrors) {
        if self.step == 0 {
            errors.push("recurrence.step", "must be at least 1");
        }
        if self.max_occurrences == Some(0) {
            errors.push("recurrence.max_occurrences", "must be at least 1");
        }
    }

    /// Appends an error when the rule asks for more than `limit` occurrences.
    pub fn check_limit(&self, limit: u32, errors: &mut ValidationErrors) {
        if self.max_occurrences.is_some_and(|max| max > limit) {
            errors.push(
                "recurrence.max_occurrences",
                format!("must be at most {limit}"),
            );
        }
    }
}
