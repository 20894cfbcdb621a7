use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::{modules::user::repository::User, utils::database::DatabaseConnection};

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub location: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateRestaurantPayload {
    pub name: String,
    pub location: String,
    pub user_id: String,
}

pub struct UpdateRestaurantPayload {
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub fn is_owner(user: &User, restaurant: &Restaurant) -> bool {
    restaurant.user_id == user.id
}

pub async fn create(
    db: &DatabaseConnection,
    payload: CreateRestaurantPayload,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        INSERT INTO restaurants (id, name, location, user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.name)
    .bind(&payload.location)
    .bind(&payload.user_id)
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a restaurant: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
        .bind(id)
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch restaurant {}: {}", id, err);
            Error::UnexpectedError
        })
}

/// Newest first.
pub async fn find_many_by_user_id(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>(
        "SELECT * FROM restaurants WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many restaurants: {}", err);
        Error::UnexpectedError
    })
}

pub async fn update_by_id(
    db: &DatabaseConnection,
    id: &str,
    payload: UpdateRestaurantPayload,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        UPDATE restaurants SET
            name = COALESCE($1, name),
            location = COALESCE($2, location),
            updated_at = NOW()
        WHERE
            id = $3
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.location)
    .bind(id)
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to update restaurant {}: {}", id, err);
        Error::UnexpectedError
    })
}

/// Categories, dishes and their links go with the restaurant.
pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<(), Error> {
    sqlx::query("DELETE FROM restaurants WHERE id = $1")
        .bind(id)
        .execute(&db.pool)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while trying to delete restaurant {}: {}", id, err);
            Error::UnexpectedError
        })
}
