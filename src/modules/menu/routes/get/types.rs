pub mod request {
    pub struct Payload {
        pub restaurant_id: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    pub struct MenuRestaurant {
        pub id: String,
        pub name: String,
        pub location: String,
    }

    #[derive(Serialize)]
    pub struct MenuDish {
        pub id: String,
        pub name: String,
        pub description: String,
        pub image: Option<String>,
        pub is_vegetarian: bool,
        pub spice_level: Option<i32>,
        pub price: Option<BigDecimal>,
    }

    #[derive(Serialize)]
    pub struct MenuCategory {
        pub id: String,
        pub name: String,
        pub dishes: Vec<MenuDish>,
    }

    #[derive(Serialize)]
    pub struct Menu {
        pub restaurant: MenuRestaurant,
        pub categories: Vec<MenuCategory>,
        pub all_dishes: Vec<MenuDish>,
    }

    pub enum Success {
        Menu(Menu),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Menu(menu) => (StatusCode::OK, Json(json!(menu))).into_response(),
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        FailedToFetchMenu,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::FailedToFetchMenu => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch menu" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
