use super::types::{request, response};
use crate::{modules::auth::guard, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    guard::restaurant(&ctx, &payload.auth.user, &payload.id)
        .await
        .map(response::Success::Restaurant)
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::RestaurantNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToFetchRestaurant,
        })
}
