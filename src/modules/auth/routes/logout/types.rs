pub mod request {
    pub struct Payload {
        pub token: Option<String>,
    }
}

pub mod response {
    use crate::modules::auth::middleware::expired_session_cookie;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::cookie::CookieJar;
    use serde_json::json;

    pub enum Success {
        LoggedOut { secure: bool },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedOut { secure } => (
                    StatusCode::OK,
                    CookieJar::new().add(expired_session_cookie(secure)),
                    Json(json!({ "success": true })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToLogOut,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToLogOut => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to log out" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
