//! Booking core: conflict detection, recurrence expansion, series grouping and
//! scoped mutation, orchestrated over the session store by [`BookingService`].
//!
//! ## Module Organization
//!
//! - `conflict`: per-client overlap test
//! - `recurrence`: date stepping and seed expansion
//! - `series`: grouping of sessions into series
//! - `mutate`: this-and-future and scoped delete planning
//! - `service`: create / update / delete / get / list orchestration

pub mod conflict;
pub mod mutate;
pub mod recurrence;
pub mod series;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use conflict::{find_conflict, overlaps};
pub use mutate::{DeleteScope, EditScope};
pub use recurrence::{Collision, ExpandOptions, Expansion, SkippedDate, add_step, expand};
pub use series::{GroupKey, SeriesGroup, group_of, group_sessions};
pub use service::{BookingService, MutationReceipt};
