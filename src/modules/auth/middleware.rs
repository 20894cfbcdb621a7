use super::service;
use crate::modules::user::repository::User;
use crate::types::Context;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect};
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http::request::Parts, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "session_token";
pub const LOGIN_PATH: &str = "/auth/login";
pub const UNAUTHENTICATED: &str = "You must be logged in to access this resource";

const PUBLIC_PREFIXES: [&str; 3] = ["/menu/", "/auth/", "/api/"];
const PROTECTED_PREFIX: &str = "/admin";

fn get_token_from_header(header: &str) -> Option<String> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// The session token from the cookie, falling back to a bearer header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok())
                .and_then(get_token_from_header)
        })
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .max_age(time::Duration::days(service::session::SESSION_VALIDITY_DAYS))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .build()
}

pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .build()
}

#[derive(Clone)]
pub struct Auth {
    pub user: User,
    pub token: String,
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": UNAUTHENTICATED })),
    )
        .into_response()
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| {
                tracing::error!("Context is not available to the Auth extractor: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })?;

        let token = token_from_headers(&parts.headers).ok_or_else(unauthenticated)?;

        service::session::resolve(ctx, &token)
            .await
            .map(|current| Self {
                user: current.user,
                token,
            })
            .ok_or_else(unauthenticated)
    }
}

pub fn requires_login(path: &str) -> bool {
    if PUBLIC_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return false;
    }

    path.starts_with(PROTECTED_PREFIX)
}

/// Sends visitors of admin pages without a live session to the login page.
pub async fn protect_admin_routes(
    State(ctx): State<Arc<Context>>,
    req: Request,
    next: Next,
) -> Response {
    if !requires_login(req.uri().path()) {
        return next.run(req).await;
    }

    let current = match token_from_headers(req.headers()) {
        Some(token) => service::session::resolve(ctx, &token).await,
        None => None,
    };

    match current {
        Some(_) => next.run(req).await,
        None => Redirect::to(LOGIN_PATH).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn only_admin_pages_require_login() {
        assert!(requires_login("/admin"));
        assert!(requires_login("/admin/restaurants/01J/dishes"));
        assert!(!requires_login("/menu/01J"));
        assert!(!requires_login("/auth/login"));
        assert!(!requires_login("/api/restaurants"));
        assert!(!requires_login("/"));
    }

    #[test]
    fn cookie_wins_over_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(
            token_from_headers(&headers),
            Some("from-header".to_string())
        );

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_token=from-cookie"),
        );
        assert_eq!(
            token_from_headers(&headers),
            Some("from-cookie".to_string())
        );
    }

    #[test]
    fn malformed_authorization_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string(), true).to_string();
        assert!(cookie.starts_with("session_token=tok"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));

        let cleared = expired_session_cookie(false).to_string();
        assert!(cleared.contains("Max-Age=0"));
        assert!(!cleared.contains("Secure"));
    }
}
