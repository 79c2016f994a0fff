use agenda_core::model::{ClientRef, Contact, Price, Session, SessionDetails};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::{pg::Pg, prelude::*};

use crate::db::enums::{CategoryColumn, StatusColumn};
use crate::db::schema;
use crate::error::DbError;

/// ## Summary
/// One row of `booking_session`.
///
/// The client identity is split over `client_id` (registry reference) and
/// `client_name`: a row without `client_id` is a legacy booking keyed by name.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = schema::booking_session)]
#[diesel(check_for_backend(Pg))]
#[diesel(treat_none_as_null = true)]
pub struct SessionRow {
    pub id: uuid::Uuid,
    pub owner_id: uuid::Uuid,
    pub series_id: Option<uuid::Uuid>,
    pub client_id: Option<uuid::Uuid>,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub category: CategoryColumn,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub location: String,
    pub city: String,
    pub description: String,
    pub price_cents: i64,
    pub photographers: Vec<String>,
    pub status: StatusColumn,
    pub external_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for SessionRow {
    fn from(session: &Session) -> Self {
        let details = &session.details;
        let client_name = match &details.client {
            ClientRef::ByName(name) => name.clone(),
            ClientRef::ById(_) => details.client_name.clone(),
        };
        Self {
            id: session.id,
            owner_id: session.owner_id,
            series_id: session.series_id,
            client_id: details.client.id(),
            client_name,
            email: details.contact.email.clone(),
            phone: details.contact.phone.clone(),
            category: CategoryColumn(details.category),
            session_date: details.date,
            start_time: details.start,
            end_time: details.end,
            location: details.location.clone(),
            city: details.city.clone(),
            description: details.description.clone(),
            price_cents: i64::try_from(details.price.cents()).unwrap_or(i64::MAX),
            photographers: details.photographers.clone(),
            status: StatusColumn(details.status),
            external_link: details.external_link.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

impl TryFrom<SessionRow> for Session {
    type Error = DbError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let price = u64::try_from(row.price_cents).map_err(|_err| DbError::CorruptRow {
            id: row.id,
            reason: format!("negative price_cents {}", row.price_cents),
        })?;
        let client = ClientRef::resolve(row.client_id, &row.client_name).ok_or_else(|| {
            DbError::CorruptRow {
                id: row.id,
                reason: "row has neither client_id nor client_name".to_string(),
            }
        })?;
        Ok(Self {
            id: row.id,
            owner_id: row.owner_id,
            series_id: row.series_id,
            details: SessionDetails {
                client,
                client_name: row.client_name,
                contact: Contact {
                    email: row.email,
                    phone: row.phone,
                },
                category: row.category.0,
                date: row.session_date,
                start: row.start_time,
                end: row.end_time,
                location: row.location,
                city: row.city,
                description: row.description,
                price: Price::from_cents(price),
                photographers: row.photographers,
                status: row.status.0,
                external_link: row.external_link,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
