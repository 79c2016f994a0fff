pub mod app;
pub mod booking_handler;
pub mod config;
pub mod error;
pub mod middleware;
