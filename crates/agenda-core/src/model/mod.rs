//! Booking domain model.
//!
//! ## Summary
//! A `Session` is one persisted appointment. A `SessionDraft` is the seed
//! handed to recurrence expansion: it is the only type that can carry a
//! `RecurrenceRule`, so persisted sessions never store one.

pub mod clock;
mod client;
mod payload;
mod recurrence;
mod session;

pub use client::{ClientRecord, ClientRef, Contact};
pub use payload::SessionPayload;
pub use recurrence::{RecurrenceRule, RecurrenceUnit};
pub use session::{Price, Session, SessionCategory, SessionDetails, SessionDraft, SessionStatus};
