use chrono::NaiveDateTime;
use ulid::Ulid;

use crate::utils::database::DatabaseConnection;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct EmailVerificationCode {
    pub id: String,
    pub email: String,
    pub code: String,
    pub expires_at: NaiveDateTime,
    pub user_id: Option<String>,
    pub created_at: NaiveDateTime,
}

pub struct CreateCodePayload {
    pub email: String,
    pub code: String,
    pub expires_at: NaiveDateTime,
    pub user_id: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Drops every code issued for the email and stores the new one in its place.
pub async fn replace(
    db: &DatabaseConnection,
    payload: CreateCodePayload,
) -> Result<EmailVerificationCode, Error> {
    let mut tx = db.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {}", err);
        Error::UnexpectedError
    })?;

    sqlx::query("DELETE FROM email_verification_codes WHERE email = $1")
        .bind(&payload.email)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while clearing old codes: {}", err);
            Error::UnexpectedError
        })?;

    let code = sqlx::query_as::<_, EmailVerificationCode>(
        "
        INSERT INTO email_verification_codes (id, email, code, expires_at, user_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.email)
    .bind(&payload.code)
    .bind(payload.expires_at)
    .bind(&payload.user_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating verification code: {}", err);
        Error::UnexpectedError
    })?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {}", err);
        Error::UnexpectedError
    })?;

    Ok(code)
}

/// Finds a code for the email that has not expired by `now`.
pub async fn find_live(
    db: &DatabaseConnection,
    email: &str,
    code: &str,
    now: NaiveDateTime,
) -> Result<Option<EmailVerificationCode>, Error> {
    sqlx::query_as::<_, EmailVerificationCode>(
        "
        SELECT * FROM email_verification_codes
        WHERE email = $1 AND code = $2 AND expires_at >= $3
        ORDER BY created_at DESC
        LIMIT 1
        ",
    )
    .bind(email)
    .bind(code)
    .bind(now)
    .fetch_optional(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch verification code: {}", err);
        Error::UnexpectedError
    })
}

/// Returns whether a row was actually removed.
pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<bool, Error> {
    sqlx::query("DELETE FROM email_verification_codes WHERE id = $1")
        .bind(id)
        .execute(&db.pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete verification code {}: {}", id, err);
            Error::UnexpectedError
        })
}
