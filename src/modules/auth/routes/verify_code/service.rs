use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let secure = ctx.app.environment.is_production();

    service::otp::verify(
        ctx,
        service::otp::VerifyPayload {
            email: payload.email,
            code: payload.code,
        },
    )
    .await
    .map(|verified| response::Success::SignedIn {
        user: verified.user,
        token: verified.session.token,
        secure,
    })
    .map_err(response::Error::Verification)
}
