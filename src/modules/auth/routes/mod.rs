mod logout;
mod send_code;
mod session;
mod verify_code;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(send_code::get_router())
        .merge(verify_code::get_router())
        .merge(session::get_router())
        .merge(logout::get_router())
}
