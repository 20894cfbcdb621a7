use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    service::otp::issue(
        ctx,
        service::otp::IssuePayload {
            email: payload.email,
            name: payload.name,
            country: payload.country,
        },
    )
    .await
    .map(|_| response::Success::CodeSent)
    .map_err(|_| response::Error::FailedToSendCode)
}
