pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_price};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    fn default_is_vegetarian() -> bool {
        true
    }

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, message = "Name must not be empty"))]
        pub name: String,
        #[validate(length(min = 1, message = "Description must not be empty"))]
        pub description: String,
        #[validate(url(code = "INVALID_IMAGE", message = "Image must be a valid URL"))]
        pub image: Option<String>,
        #[serde(default = "default_is_vegetarian")]
        pub is_vegetarian: bool,
        #[validate(range(min = 0, max = 3, message = "Spice level must be between 0 and 3"))]
        pub spice_level: Option<i32>,
        #[validate(custom(code = "INVALID_PRICE", function = "validate_price"))]
        pub price: Option<BigDecimal>,
        #[serde(default)]
        pub category_ids: Vec<String>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub restaurant_id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::dish::repository::Dish, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        DishCreated(Dish),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DishCreated(dish) => (StatusCode::CREATED, Json(json!(dish))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        InvalidCategories,
        FailedToCreateDish,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::InvalidCategories => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Some categories not found or don't belong to this restaurant"
                    })),
                )
                    .into_response(),
                Self::FailedToCreateDish => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create dish" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
