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

    let dish = guard::dish(&ctx, &payload.auth.user, &payload.id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::DishNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToUpdateDish,
        })?;

    let category_ids = match payload.body.category_ids {
        Some(category_ids) => Some(
            service::check_categories(&ctx, &dish.restaurant_id, category_ids)
                .await
                .map_err(|err| match err {
                    service::Error::InvalidCategories => response::Error::InvalidCategories,
                    service::Error::UnexpectedError => response::Error::FailedToUpdateDish,
                })?,
        ),
        None => None,
    };

    repository::update_by_id(
        &ctx.db_conn,
        &dish.id,
        repository::UpdateDishPayload {
            name: payload.body.name,
            description: payload.body.description,
            image: payload.body.image,
            is_vegetarian: payload.body.is_vegetarian,
            spice_level: payload.body.spice_level,
            price: payload.body.price,
            category_ids,
        },
    )
    .await
    .map(response::Success::DishUpdated)
    .map_err(|_| response::Error::FailedToUpdateDish)
}
