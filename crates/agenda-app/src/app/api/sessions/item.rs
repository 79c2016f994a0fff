use agenda_service::booking::{DeleteScope, EditScope};
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, handler};

use super::request::{context, payload, scope, session_id};
use crate::error::AppError;

#[handler]
pub(super) async fn get_session(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let (booking, owner_id) = context(depot)?;
        let id = session_id(req)?;
        Ok::<_, AppError>(booking.get(owner_id, id).await?)
    }
    .await;

    match result {
        Ok(session) => res.render(Json(session)),
        Err(err) => err.render(res),
    }
}

/// ## Summary
/// Partially updates a session.
///
/// `?scope=only_this|this_and_future` is required when the session belongs
/// to a series of more than one member; without it the response is
/// `428 Precondition Required` carrying the series size.
#[handler]
pub(super) async fn update_session(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let (booking, owner_id) = context(depot)?;
        let id = session_id(req)?;
        let scope = scope::<EditScope>(req)?;
        let payload = payload(req).await?;
        Ok::<_, AppError>(booking.update(owner_id, id, payload, scope).await?)
    }
    .await;

    match result {
        Ok(receipt) => res.render(Json(receipt)),
        Err(err) => err.render(res),
    }
}

/// ## Summary
/// Deletes a session, `?scope=next` the earliest of its series, or
/// `?scope=all` the whole series. Defaults to `single`.
#[handler]
pub(super) async fn delete_session(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let (booking, owner_id) = context(depot)?;
        let id = session_id(req)?;
        let scope = scope::<DeleteScope>(req)?.unwrap_or_default();
        Ok::<_, AppError>(booking.delete(owner_id, id, scope).await?)
    }
    .await;

    match result {
        Ok(receipt) => res.render(Json(receipt)),
        Err(err) => err.render(res),
    }
}
