use super::types::{request, response};
use crate::{
    modules::{auth::guard, restaurant::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = guard::restaurant(&ctx, &payload.auth.user, &payload.id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::RestaurantNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToDeleteRestaurant,
        })?;

    repository::delete_by_id(&ctx.db_conn, &restaurant.id)
        .await
        .map(|_| response::Success::RestaurantDeleted)
        .map_err(|_| response::Error::FailedToDeleteRestaurant)
}
