use agenda_core::model::{
    ClientRef, Contact, Price, Session, SessionCategory, SessionDetails, SessionStatus,
};
use chrono::{NaiveDate, NaiveTime};

pub const OWNER: uuid::Uuid = uuid::Uuid::from_u128(0x0195_5a2e_0000_7000_8000_0000_0000_0001);

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// A pending studio session for `client` at 10:00 with no end time.
pub fn details(client: &str, year: i32, month: u32, day: u32) -> SessionDetails {
    SessionDetails {
        client: ClientRef::ByName(client.to_string()),
        client_name: client.to_string(),
        contact: Contact {
            email: format!("{}@example.com", client.to_lowercase()),
            phone: String::new(),
        },
        category: SessionCategory::Studio,
        date: date(year, month, day),
        start: time(10, 0),
        end: None,
        location: String::new(),
        city: String::new(),
        description: String::new(),
        price: Price::ZERO,
        photographers: Vec::new(),
        status: SessionStatus::Pending,
        external_link: None,
    }
}

pub fn session(details: SessionDetails) -> Session {
    Session::new(OWNER, details, None)
}
