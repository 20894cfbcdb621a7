use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, NaiveDateTime};
use rand::RngCore;
use std::sync::Arc;

use super::super::repository;
use crate::{
    modules::{
        auth::repository::session::Session,
        user::{self, repository::User},
    },
    types::Context,
};

pub const SESSION_VALIDITY_DAYS: i64 = 30;
const TOKEN_BYTES: usize = 32;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub struct CurrentSession {
    pub session: Session,
    pub user: User,
}

pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn is_live(session: &Session, now: NaiveDateTime) -> bool {
    now < session.expires_at
}

pub async fn create(ctx: Arc<Context>, user_id: String) -> Result<Session> {
    repository::session::create(
        &ctx.db_conn,
        repository::session::SessionCreationPayload {
            user_id,
            token: generate_token(),
            expires_at: ctx.clock.now() + Duration::days(SESSION_VALIDITY_DAYS),
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)
}

/// The live session for the token together with its user.
///
/// Never fails: lookup errors are logged and read as "no session". Expired
/// rows are left in place.
pub async fn resolve(ctx: Arc<Context>, token: &str) -> Option<CurrentSession> {
    let session = match repository::session::find_by_token(&ctx.db_conn, token).await {
        Ok(Some(session)) => session,
        Ok(None) => return None,
        Err(err) => {
            tracing::error!("Failed to resolve session: {:?}", err);
            return None;
        }
    };

    if !is_live(&session, ctx.clock.now()) {
        tracing::debug!("Session {} expired at {}", session.id, session.expires_at);
        return None;
    }

    match user::repository::find_by_id(&ctx.db_conn, &session.user_id).await {
        Ok(Some(user)) => Some(CurrentSession { session, user }),
        Ok(None) => {
            tracing::warn!("Session {} points at a missing user", session.id);
            None
        }
        Err(err) => {
            tracing::error!("Failed to load user for session {}: {:?}", session.id, err);
            None
        }
    }
}

pub async fn destroy(ctx: Arc<Context>, token: &str) -> Result<()> {
    repository::session::delete_by_token(&ctx.db_conn, token)
        .await
        .map(|deleted| tracing::debug!("Deleted {} session(s)", deleted))
        .map_err(|_| Error::UnexpectedError)
}
