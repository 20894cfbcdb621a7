pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(email(code = "INVALID_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(length(min = 1, message = "Code must not be empty"))]
        pub code: String,
    }
}

pub mod response {
    use crate::{
        modules::{
            auth::{middleware::session_cookie, service::otp::VerificationError},
            user::repository::User,
        },
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::cookie::CookieJar;
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        SignedIn {
            user: User,
            token: String,
            secure: bool,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedIn {
                    user,
                    token,
                    secure,
                } => (
                    StatusCode::OK,
                    CookieJar::new().add(session_cookie(token.clone(), secure)),
                    Json(json!({
                        "success": true,
                        "user": user,
                        "token": token,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        Verification(VerificationError),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::Verification(err) => {
                    let status = match err {
                        VerificationError::InvalidCodeLength { .. }
                        | VerificationError::UserNotFound => StatusCode::BAD_REQUEST,
                        VerificationError::InvalidOrExpiredCode { .. } => StatusCode::UNAUTHORIZED,
                        VerificationError::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
                    };

                    (status, Json(json!({ "error": err.message() }))).into_response()
                }
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
