use super::types::{request, response};
use crate::{
    modules::{auth::guard, restaurant::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = guard::restaurant(&ctx, &payload.auth.user, &payload.id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::RestaurantNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToUpdateRestaurant,
        })?;

    repository::update_by_id(
        &ctx.db_conn,
        &restaurant.id,
        repository::UpdateRestaurantPayload {
            name: payload.body.name,
            location: payload.body.location,
        },
    )
    .await
    .map(response::Success::RestaurantUpdated)
    .map_err(|_| response::Error::FailedToUpdateRestaurant)
}
