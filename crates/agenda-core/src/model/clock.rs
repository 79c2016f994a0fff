//! `HH:MM` wall-clock serialization for `chrono::NaiveTime`.
//!
//! Bookings are kept to the minute: seconds are accepted on input and
//! dropped, so every stored time is written back exactly.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

const WRITE_FORMAT: &str = "%H:%M";

/// ## Summary
/// Parses `HH:MM` or `HH:MM:SS`, truncated to the minute.
#[must_use]
pub fn parse(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_err| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
        .and_then(truncate)
}

/// Drops seconds and sub-seconds.
#[must_use]
pub fn truncate(time: NaiveTime) -> Option<NaiveTime> {
    time.with_second(0)?.with_nanosecond(0)
}

/// ## Summary
/// Formats as `HH:MM`.
#[must_use]
pub fn format(time: NaiveTime) -> String {
    time.format(WRITE_FORMAT).to_string()
}

/// ## Errors
/// Propagates serializer errors.
#[expect(clippy::trivially_copy_pass_by_ref, reason = "serde `with` signature")]
pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*time))
}

/// ## Errors
/// Returns an error when the input is not `HH:MM` or `HH:MM:SS`.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'")))
}

/// Same as the parent module, for optional times.
pub mod option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// ## Errors
    /// Propagates serializer errors.
    #[expect(clippy::ref_option, reason = "serde `with` signature")]
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_some(&super::format(*time)),
            None => serializer.serialize_none(),
        }
    }

    /// ## Errors
    /// Returns an error when a present value is not a valid time.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'"))),
        }
    }
}
