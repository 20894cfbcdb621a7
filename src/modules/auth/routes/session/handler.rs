use super::{service::service, types::request};
use crate::{modules::auth::middleware::token_from_headers, types::Context};
use axum::{extract::State, http::HeaderMap, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(State(ctx): State<Arc<Context>>, headers: HeaderMap) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            token: token_from_headers(&headers),
        },
    )
    .await
}
