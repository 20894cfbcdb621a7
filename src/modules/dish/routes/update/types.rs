pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_price};
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer};
    use validator::Validate;

    /// Tells an explicit `null` (`Some(None)`) apart from a missing field (`None`).
    fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, message = "Name must not be empty"))]
        pub name: Option<String>,
        #[validate(length(min = 1, message = "Description must not be empty"))]
        pub description: Option<String>,
        #[serde(default, deserialize_with = "nullable")]
        #[validate(url(code = "INVALID_IMAGE", message = "Image must be a valid URL"))]
        pub image: Option<Option<String>>,
        pub is_vegetarian: Option<bool>,
        #[serde(default, deserialize_with = "nullable")]
        #[validate(range(min = 0, max = 3, message = "Spice level must be between 0 and 3"))]
        pub spice_level: Option<Option<i32>>,
        #[serde(default, deserialize_with = "nullable")]
        #[validate(custom(code = "INVALID_PRICE", function = "validate_price"))]
        pub price: Option<Option<BigDecimal>>,
        pub category_ids: Option<Vec<String>>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
        pub body: Body,
    }

}

pub mod response {
    use crate::{modules::dish::repository::Dish, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        DishUpdated(Dish),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DishUpdated(dish) => (StatusCode::OK, Json(json!(dish))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        DishNotFound,
        InvalidCategories,
        FailedToUpdateDish,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::DishNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Dish not found" })),
                )
                    .into_response(),
                Self::InvalidCategories => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Some categories not found or don't belong to this restaurant"
                    })),
                )
                    .into_response(),
                Self::FailedToUpdateDish => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update dish" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
