//! Resolution of the acting user.
//!
//! ## Module Organization
//!
//! - `actor`: the authenticated actor and its derived id
//! - `authenticate`: single user and proxy header authentication
//! - `depot`: storing and reading the actor in the Salvo depot

pub mod actor;
pub mod authenticate;
pub mod depot;

pub use actor::Actor;
pub use authenticate::authenticate;
pub use depot::get_actor_from_depot;
