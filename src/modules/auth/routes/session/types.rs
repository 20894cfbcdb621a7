pub mod request {
    pub struct Payload {
        pub token: Option<String>,
    }
}

pub mod response {
    use crate::modules::user::repository::User;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use chrono::NaiveDateTime;
    use serde_json::json;

    pub enum Success {
        Active {
            user: User,
            expires_at: NaiveDateTime,
        },
        Anonymous,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Active { user, expires_at } => (
                    StatusCode::OK,
                    Json(json!({ "user": user, "expires_at": expires_at })),
                )
                    .into_response(),
                Self::Anonymous => {
                    (StatusCode::OK, Json(json!({ "user": null }))).into_response()
                }
            }
        }
    }

    /// Resolution never fails; a broken session reads as anonymous.
    pub type Response = Success;
}
