use super::types::{request, response};
use crate::{
    modules::{auth::guard, dish::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let dish = guard::dish(&ctx, &payload.auth.user, &payload.id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::DishNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToDeleteDish,
        })?;

    repository::delete_by_id(&ctx.db_conn, &dish.id)
        .await
        .map(|_| response::Success::DishDeleted)
        .map_err(|_| response::Error::FailedToDeleteDish)
}
