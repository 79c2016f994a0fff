//! Session CRUD endpoints.
//!
//! ## Module Organization
//!
//! - `collection`: list, list groups and create under `/api/sessions`
//! - `item`: get, update and delete under `/api/sessions/{id}`
//! - `request`: path, query and body extraction shared by the handlers

mod collection;
mod item;
mod request;

use salvo::Router;

use super::SESSIONS_ROUTE_COMPONENT;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SESSIONS_ROUTE_COMPONENT)
        .get(collection::list_sessions)
        .post(collection::create_session)
        .push(Router::with_path("groups").get(collection::list_groups))
        .push(
            Router::with_path("{id}")
                .get(item::get_session)
                .put(item::update_session)
                .delete(item::delete_session),
        )
}
