use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let secure = ctx.app.environment.is_production();

    if let Some(token) = payload.token {
        service::session::destroy(ctx, &token)
            .await
            .map_err(|_| response::Error::FailedToLogOut)?;
    }

    Ok(response::Success::LoggedOut { secure })
}
