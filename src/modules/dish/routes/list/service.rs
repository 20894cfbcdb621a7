use super::types::{request, response};
use crate::{
    modules::{auth::guard, dish::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = guard::restaurant(&ctx, &payload.auth.user, &payload.restaurant_id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::RestaurantNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToFetchDishes,
        })?;

    repository::find_many_by_restaurant_id(&ctx.db_conn, &restaurant.id)
        .await
        .map(response::Success::Dishes)
        .map_err(|_| response::Error::FailedToFetchDishes)
}
