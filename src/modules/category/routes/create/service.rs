use super::types::{request, response};
use crate::{
    modules::{auth::guard, category::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = guard::restaurant(&ctx, &payload.auth.user, &payload.restaurant_id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::RestaurantNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToCreateCategory,
        })?;

    repository::create(
        &ctx.db_conn,
        repository::CreateCategoryPayload {
            name: payload.body.name,
            restaurant_id: restaurant.id,
        },
    )
    .await
    .map(response::Success::CategoryCreated)
    .map_err(|_| response::Error::FailedToCreateCategory)
}
