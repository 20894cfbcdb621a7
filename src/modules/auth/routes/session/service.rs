use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let current = match payload.token {
        Some(token) => service::session::resolve(ctx, &token).await,
        None => None,
    };

    match current {
        Some(current) => response::Success::Active {
            user: current.user,
            expires_at: current.session.expires_at,
        },
        None => response::Success::Anonymous,
    }
}
