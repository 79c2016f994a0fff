//! Shared configuration, error types and the booking domain model.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
