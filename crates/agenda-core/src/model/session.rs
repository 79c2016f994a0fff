use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::clock;
use super::{ClientRef, Contact, RecurrenceRule};

/// Kind of photo session being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
    Studio,
    Event,
    Birthday,
    MonthBirthday,
    Maternity,
    Graduation,
    Debutante,
    Wedding,
}

impl SessionCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::Event => "event",
            Self::Birthday => "birthday",
            Self::MonthBirthday => "month_birthday",
            Self::Maternity => "maternity",
            Self::Graduation => "graduation",
            Self::Debutante => "debutante",
            Self::Wedding => "wedding",
        }
    }
}

impl fmt::Display for SessionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl SessionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Non-negative amount with two fraction digits, held in minor units.
///
/// Serialized as a JSON number (`150.5`), never as a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Largest accepted amount, in whole units.
    pub const MAX_DECIMAL: f64 = 1_000_000_000.0;

    /// ## Summary
    /// Rounds a decimal amount to cents. Amounts that are negative, non-finite
    /// or above [`Self::MAX_DECIMAL`] are rejected.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is finite, within range and rounded"
    )]
    pub fn from_decimal(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=Self::MAX_DECIMAL).contains(&value))
            .then(|| Self((value * 100.0).round() as u64))
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "prices stay far below 2^52 cents")]
    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_decimal(value)
            .ok_or_else(|| serde::de::Error::custom("price out of range"))
    }
}

/// ## Summary
/// Everything about a booking except its storage identity.
///
/// Shared by persisted sessions and by drafts, so a recurrence expansion can
/// stamp the same details onto many dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDetails {
    pub client: ClientRef,
    pub client_name: String,
    pub contact: Contact,
    pub category: SessionCategory,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start: NaiveTime,
    #[serde(with = "clock::option", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveTime>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub photographers: Vec<String>,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

impl SessionDetails {
    /// Same details, moved to another calendar date.
    #[must_use]
    pub fn on_date(&self, date: NaiveDate) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: uuid::Uuid,
    pub owner_id: uuid::Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<uuid::Uuid>,
    #[serde(flatten)]
    pub details: SessionDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// ## Summary
    /// Creates a new, not yet persisted session with a fresh v7 id.
    #[must_use]
    pub fn new(owner_id: uuid::Uuid, details: SessionDetails, series_id: Option<uuid::Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::now_v7(),
            owner_id,
            series_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.details.date
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.details.status == SessionStatus::Completed
    }
}

/// ## Summary
/// A booking request before it is persisted. When it carries a rule it is the
/// seed of a recurrence expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    #[serde(flatten)]
    pub details: SessionDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

impl SessionDraft {
    #[must_use]
    pub const fn single(details: SessionDetails) -> Self {
        Self {
            details,
            recurrence: None,
        }
    }

    #[must_use]
    pub const fn recurring(details: SessionDetails, rule: RecurrenceRule) -> Self {
        Self {
            details,
            recurrence: Some(rule),
        }
    }
}
