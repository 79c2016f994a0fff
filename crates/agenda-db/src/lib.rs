//! Persistence boundary for booking sessions and the read-only registries.

pub mod db;
pub mod error;
pub mod model;
