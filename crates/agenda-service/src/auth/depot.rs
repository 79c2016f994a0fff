//! Depot helpers for the authenticated actor.

use super::actor::Actor;
use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const AUTHENTICATED_ACTOR: &str = "__authenticated_actor";
}

pub fn insert_actor(depot: &mut salvo::Depot, actor: Actor) {
    depot.insert(depot_keys::AUTHENTICATED_ACTOR, actor);
}

/// Get the authenticated actor from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no actor was stored by the auth middleware.
pub fn get_actor_from_depot(depot: &salvo::Depot) -> ServiceResult<&Actor> {
    depot
        .get::<Actor>(depot_keys::AUTHENTICATED_ACTOR)
        .map_err(|_e| ServiceError::NotAuthenticated)
}
