use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::clock;
use super::{
    ClientRecord, ClientRef, Contact, Price, RecurrenceRule, SessionCategory, SessionDetails,
    SessionDraft, SessionStatus,
};
use crate::error::ValidationErrors;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// ## Summary
/// Session fields as submitted by a caller.
///
/// Every field is optional so the same shape serves full creates and partial
/// updates. Dates and times stay strings until validation so that a bad value
/// is reported against its field instead of failing the whole body.
/// On update, an empty `end` or `external_link` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionPayload {
    pub client_id: Option<uuid::Uuid>,
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<SessionCategory>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub photographers: Option<Vec<String>>,
    pub status: Option<SessionStatus>,
    pub external_link: Option<String>,
    pub recurrence: Option<RecurrenceRule>,
}

impl SessionPayload {
    /// ## Summary
    /// Validates a create payload into a draft.
    ///
    /// `client` is the registry record for `client_id`, when one was given;
    /// its name and contact fill whatever the payload left out.
    ///
    /// ## Errors
    /// Returns every rejected field: missing client identity, email, category,
    /// date or start time, unparsable date/times, negative price, bad rule.
    pub fn into_draft(self, client: Option<&ClientRecord>) -> Result<SessionDraft, ValidationErrors> {
        self.build(None, client)
    }

    /// ## Summary
    /// Applies a partial payload over stored details. Absent fields keep their
    /// current value.
    ///
    /// ## Errors
    /// Returns every rejected field, as for [`Self::into_draft`].
    pub fn merge_into(
        self,
        current: &SessionDetails,
        client: Option<&ClientRecord>,
    ) -> Result<SessionDraft, ValidationErrors> {
        self.build(Some(current), client)
    }

    fn build(
        self,
        base: Option<&SessionDetails>,
        client: Option<&ClientRecord>,
    ) -> Result<SessionDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let client_name = self
            .client_name
            .clone()
            .or_else(|| client.map(|record| record.name.clone()))
            .or_else(|| base.map(|current| current.client_name.clone()))
            .unwrap_or_default()
            .trim()
            .to_string();
        let client_ref = match (self.client_id, base) {
            (Some(id), _) => Some(ClientRef::ById(id)),
            (None, Some(current)) => match &current.client {
                ClientRef::ByName(_) if self.client_name.is_some() => {
                    ClientRef::resolve(None, &client_name)
                }
                other => Some(other.clone()),
            },
            (None, None) => ClientRef::resolve(None, &client_name),
        };
        if client_ref.is_none() {
            errors.push("client", "a client id or client name is required");
        }

        let email = self
            .email
            .or_else(|| client.map(|record| record.email.clone()))
            .or_else(|| base.map(|current| current.contact.email.clone()))
            .unwrap_or_default()
            .trim()
            .to_string();
        if email.is_empty() {
            errors.push("email", "is required");
        } else if !looks_like_email(&email) {
            errors.push("email", "is not a valid email address");
        }
        let phone = self
            .phone
            .or_else(|| client.map(|record| record.phone.clone()))
            .or_else(|| base.map(|current| current.contact.phone.clone()))
            .unwrap_or_default();

        let category = self.category.or_else(|| base.map(|current| current.category));
        if category.is_none() {
            errors.push("category", "is required");
        }

        let date = match self.date.as_deref() {
            Some(raw) => parse_date(raw).or_else(|| {
                errors.push("date", "must be a calendar date (YYYY-MM-DD)");
                None
            }),
            None => base.map(|current| current.date).or_else(|| {
                errors.push("date", "is required");
                None
            }),
        };

        let start = match self.start.as_deref() {
            Some(raw) => clock::parse(raw).or_else(|| {
                errors.push("start", "must be a time (HH:MM)");
                None
            }),
            None => base.map(|current| current.start).or_else(|| {
                errors.push("start", "is required");
                None
            }),
        };

        let end = match self.end.as_deref() {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => clock::parse(raw).or_else(|| {
                errors.push("end", "must be a time (HH:MM)");
                None
            }),
            None => base.and_then(|current| current.end),
        };

        let price = match self.price {
            Some(value) => Price::from_decimal(value).unwrap_or_else(|| {
                errors.push(
                    "price",
                    format!("must be a number between 0 and {}", Price::MAX_DECIMAL),
                );
                Price::ZERO
            }),
            None => base.map_or(Price::ZERO, |current| current.price),
        };

        if let Some(rule) = &self.recurrence {
            rule.check(&mut errors);
        }

        let external_link = match self.external_link {
            Some(link) if link.trim().is_empty() => None,
            Some(link) => Some(link),
            None => base.and_then(|current| current.external_link.clone()),
        };

        let (Some(client_ref), Some(category), Some(date), Some(start)) =
            (client_ref, category, date, start)
        else {
            return Err(errors);
        };

        let details = SessionDetails {
            client: client_ref,
            client_name,
            contact: Contact { email, phone },
            category,
            date,
            start,
            end,
            location: pick(self.location, base, |current| &current.location),
            city: pick(self.city, base, |current| &current.city),
            description: pick(self.description, base, |current| &current.description),
            price,
            photographers: self
                .photographers
                .or_else(|| base.map(|current| current.photographers.clone()))
                .unwrap_or_default(),
            status: self
                .status
                .or_else(|| base.map(|current| current.status))
                .unwrap_or_default(),
            external_link,
        };

        errors.into_result(SessionDraft {
            details,
            recurrence: self.recurrence,
        })
    }
}

fn pick(
    value: Option<String>,
    base: Option<&SessionDetails>,
    field: impl Fn(&SessionDetails) -> &String,
) -> String {
    value
        .or_else(|| base.map(|current| field(current).clone()))
        .unwrap_or_default()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn looks_like_email(value: &str) -> bool {
    value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'))
}
