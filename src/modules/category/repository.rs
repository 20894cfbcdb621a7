use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::utils::database::DatabaseConnection;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub restaurant_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateCategoryPayload {
    pub name: String,
    pub restaurant_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create(
    db: &DatabaseConnection,
    payload: CreateCategoryPayload,
) -> Result<Category, Error> {
    sqlx::query_as::<_, Category>(
        "
        INSERT INTO categories (id, name, restaurant_id)
        VALUES ($1, $2, $3)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.name)
    .bind(&payload.restaurant_id)
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a category: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch category {}: {}", id, err);
            Error::UnexpectedError
        })
}

/// Sorted by name.
pub async fn find_many_by_restaurant_id(
    db: &DatabaseConnection,
    restaurant_id: &str,
) -> Result<Vec<Category>, Error> {
    sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE restaurant_id = $1 ORDER BY name ASC, id ASC",
    )
    .bind(restaurant_id)
    .fetch_all(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many categories: {}", err);
        Error::UnexpectedError
    })
}

/// Only the ids that exist and belong to the restaurant come back.
pub async fn find_many_by_ids_and_restaurant_id(
    db: &DatabaseConnection,
    ids: &[String],
    restaurant_id: &str,
) -> Result<Vec<Category>, Error> {
    sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE id = ANY($1) AND restaurant_id = $2",
    )
    .bind(ids)
    .bind(restaurant_id)
    .fetch_all(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch categories by ids: {}", err);
        Error::UnexpectedError
    })
}

pub async fn update_by_id(
    db: &DatabaseConnection,
    id: &str,
    name: String,
) -> Result<Category, Error> {
    sqlx::query_as::<_, Category>(
        "UPDATE categories SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(name)
    .bind(id)
    .fetch_one(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to update category {}: {}", id, err);
        Error::UnexpectedError
    })
}

/// Dish links to the category are removed with it.
pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<(), Error> {
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&db.pool)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while trying to delete category {}: {}", id, err);
            Error::UnexpectedError
        })
}
