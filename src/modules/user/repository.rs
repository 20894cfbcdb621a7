use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::utils::database::DatabaseConnection;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub country: Option<String>,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateUserPayload {
    pub email: String,
    pub name: Option<String>,
    pub country: Option<String>,
    pub email_verified: bool,
}

#[derive(Default)]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub country: Option<String>,
    pub email_verified: Option<bool>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create(db: &DatabaseConnection, payload: CreateUserPayload) -> Result<User, Error> {
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, email, name, country, email_verified)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.email)
    .bind(&payload.name)
    .bind(&payload.country)
    .bind(payload.email_verified)
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating user {}: {}", payload.email, err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email: {}", err);
            Error::UnexpectedError
        })
}

pub async fn update_by_id(
    db: &DatabaseConnection,
    id: &str,
    payload: UpdateUserPayload,
) -> Result<User, Error> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            name = COALESCE($1, name),
            country = COALESCE($2, country),
            email_verified = COALESCE($3, email_verified),
            updated_at = NOW()
        WHERE
            id = $4
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.country)
    .bind(payload.email_verified)
    .bind(id)
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating user with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn verify_email_by_id(db: &DatabaseConnection, id: &str) -> Result<User, Error> {
    update_by_id(
        db,
        id,
        UpdateUserPayload {
            email_verified: Some(true),
            ..Default::default()
        },
    )
    .await
}
