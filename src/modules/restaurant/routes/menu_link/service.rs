use super::types::{request, response};
use crate::{modules::auth::guard, types::Context};
use std::sync::Arc;

/// Where the printed QR code should point for this restaurant.
pub fn menu_url(base_url: &str, restaurant_id: &str) -> String {
    format!("{}/menu/{}", base_url.trim_end_matches('/'), restaurant_id)
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = guard::restaurant(&ctx, &payload.auth.user, &payload.id)
        .await
        .map_err(|err| match err {
            guard::Error::NotFound => response::Error::RestaurantNotFound,
            guard::Error::UnexpectedError => response::Error::FailedToFetchRestaurant,
        })?;

    Ok(response::Success::MenuLink(menu_url(
        &ctx.app.url,
        &restaurant.id,
    )))
}

#[cfg(test)]
mod tests {
    use super::menu_url;

    #[test]
    fn menu_url_ignores_trailing_slash() {
        assert_eq!(
            menu_url("https://menu.example.com/", "01J9"),
            "https://menu.example.com/menu/01J9"
        );
        assert_eq!(
            menu_url("http://0.0.0.0:8000", "01J9"),
            "http://0.0.0.0:8000/menu/01J9"
        );
    }
}
