use super::types::{request, response};
use crate::{
    modules::{
        auth::guard,
        dish::{repository, service},
    },
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
            guard::Error::UnexpectedError => response::Error::FailedToCreateDish,
        })?;

    let category_ids =
        service::check_categories(&ctx, &restaurant.id, payload.body.category_ids)
            .await
            .map_err(|err| match err {
                service::Error::InvalidCategories => response::Error::InvalidCategories,
                service::Error::UnexpectedError => response::Error::FailedToCreateDish,
            })?;

    repository::create(
        &ctx.db_conn,
        repository::CreateDishPayload {
            name: payload.body.name,
            description: payload.body.description,
            image: payload.body.image,
            is_vegetarian: payload.body.is_vegetarian,
            spice_level: payload.body.spice_level,
            price: payload.body.price,
            restaurant_id: restaurant.id,
            category_ids,
        },
    )
    .await
    .map(response::Success::DishCreated)
    .map_err(|_| response::Error::FailedToCreateDish)
}
