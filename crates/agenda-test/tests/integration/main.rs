mod auth;
mod helpers;
mod pg_store;
