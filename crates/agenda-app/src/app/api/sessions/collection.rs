use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, handler};

use super::request::{context, payload};
use crate::error::AppError;

/// ## Summary
/// Lists the actor's sessions, latest date first.
#[handler]
pub(super) async fn list_sessions(depot: &mut Depot, res: &mut Response) {
    let result = async {
        let (booking, owner_id) = context(depot)?;
        Ok::<_, AppError>(booking.list(owner_id).await?)
    }
    .await;

    match result {
        Ok(sessions) => res.render(Json(sessions)),
        Err(err) => err.render(res),
    }
}

/// ## Summary
/// Lists the actor's sessions grouped into series.
#[handler]
pub(super) async fn list_groups(depot: &mut Depot, res: &mut Response) {
    let result = async {
        let (booking, owner_id) = context(depot)?;
        Ok::<_, AppError>(booking.list_groups(owner_id).await?)
    }
    .await;

    match result {
        Ok(groups) => res.render(Json(groups)),
        Err(err) => err.render(res),
    }
}

/// ## Summary
/// Books a session or a recurring series.
///
/// Responds `201 Created` with the created ids and any generated dates that
/// were skipped because of a collision.
#[handler]
pub(super) async fn create_session(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = async {
        let (booking, owner_id) = context(depot)?;
        let payload = payload(req).await?;
        Ok::<_, AppError>(booking.create(owner_id, payload).await?)
    }
    .await;

    match result {
        Ok(receipt) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(receipt));
        }
        Err(err) => err.render(res),
    }
}
