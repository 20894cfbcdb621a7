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

    let category = guard::category(&ctx, &payload.auth.user, &payload.id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::CategoryNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToUpdateCategory,
        })?;

    repository::update_by_id(&ctx.db_conn, &category.id, payload.body.name)
        .await
        .map(response::Success::CategoryUpdated)
        .map_err(|_| response::Error::FailedToUpdateCategory)
}
