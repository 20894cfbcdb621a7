use super::types::{request, response};
use crate::{
    modules::{auth::guard, category::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let category = guard::category(&ctx, &payload.auth.user, &payload.id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::CategoryNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToDeleteCategory,
        })?;

    repository::delete_by_id(&ctx.db_conn, &category.id)
        .await
        .map(|_| response::Success::CategoryDeleted)
        .map_err(|_| response::Error::FailedToDeleteCategory)
}
