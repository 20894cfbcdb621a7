use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, PgConnection};
use std::collections::HashMap;
use ulid::Ulid;

use crate::{modules::category::repository::Category, utils::database::DatabaseConnection};

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub is_vegetarian: bool,
    pub spice_level: Option<i32>,
    pub price: Option<BigDecimal>,
    pub restaurant_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Clone, Debug)]
pub struct DishWithCategories {
    #[serde(flatten)]
    pub dish: Dish,
    pub categories: Vec<Category>,
}

#[derive(sqlx::FromRow)]
struct LinkedCategory {
    dish_id: String,
    #[sqlx(flatten)]
    category: Category,
}

pub struct CreateDishPayload {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub is_vegetarian: bool,
    pub spice_level: Option<i32>,
    pub price: Option<BigDecimal>,
    pub restaurant_id: String,
    pub category_ids: Vec<String>,
}

/// `None` leaves a field alone; `Some(None)` clears a nullable one.
#[derive(Default)]
pub struct UpdateDishPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<Option<String>>,
    pub is_vegetarian: Option<bool>,
    pub spice_level: Option<Option<i32>>,
    pub price: Option<Option<BigDecimal>>,
    pub category_ids: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

async fn link_categories(
    conn: &mut PgConnection,
    dish_id: &str,
    category_ids: &[String],
) -> Result<(), sqlx::Error> {
    if category_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "
        INSERT INTO dish_categories (dish_id, category_id)
        SELECT $1, UNNEST($2::VARCHAR[])
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(dish_id)
    .bind(category_ids)
    .execute(conn)
    .await
    .map(|_| ())
}

/// The dish and its category links are written in one transaction.
pub async fn create(db: &DatabaseConnection, payload: CreateDishPayload) -> Result<Dish, Error> {
    let mut tx = db.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {}", err);
        Error::UnexpectedError
    })?;

    let dish = sqlx::query_as::<_, Dish>(
        "
        INSERT INTO dishes (
            id,
            name,
            description,
            image,
            is_vegetarian,
            spice_level,
            price,
            restaurant_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&payload.image)
    .bind(payload.is_vegetarian)
    .bind(payload.spice_level)
    .bind(&payload.price)
    .bind(&payload.restaurant_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a dish: {}", err);
        Error::UnexpectedError
    })?;

    link_categories(&mut *tx, &dish.id, &payload.category_ids)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while linking dish categories: {}", err);
            Error::UnexpectedError
        })?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {}", err);
        Error::UnexpectedError
    })?;

    Ok(dish)
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Dish>, Error> {
    sqlx::query_as::<_, Dish>("SELECT * FROM dishes WHERE id = $1")
        .bind(id)
        .fetch_optional(&db.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch dish {}: {}", id, err);
            Error::UnexpectedError
        })
}

fn attach_categories(
    dishes: Vec<Dish>,
    mut categories_by_dish: HashMap<String, Vec<Category>>,
) -> Vec<DishWithCategories> {
    dishes
        .into_iter()
        .map(|dish| DishWithCategories {
            categories: categories_by_dish.remove(&dish.id).unwrap_or_default(),
            dish,
        })
        .collect()
}

/// Newest first, each dish with its categories sorted by name.
pub async fn find_many_by_restaurant_id(
    db: &DatabaseConnection,
    restaurant_id: &str,
) -> Result<Vec<DishWithCategories>, Error> {
    let dishes = sqlx::query_as::<_, Dish>(
        "SELECT * FROM dishes WHERE restaurant_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(restaurant_id)
    .fetch_all(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many dishes: {}", err);
        Error::UnexpectedError
    })?;

    let dish_ids = dishes.iter().map(|dish| dish.id.clone()).collect::<Vec<_>>();

    let categories_by_dish = sqlx::query_as::<_, LinkedCategory>(
        "
        SELECT
            dish_categories.dish_id,
            categories.id,
            categories.name,
            categories.restaurant_id,
            categories.created_at,
            categories.updated_at
        FROM dish_categories
        INNER JOIN categories ON categories.id = dish_categories.category_id
        WHERE dish_categories.dish_id = ANY($1)
        ORDER BY categories.name ASC
        ",
    )
    .bind(&dish_ids)
    .fetch_all(&db.pool)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch dish categories: {}", err);
        Error::UnexpectedError
    })?
    .into_iter()
    .map(|linked| (linked.dish_id, linked.category))
    .into_group_map();

    Ok(attach_categories(dishes, categories_by_dish))
}

/// Fields and, when `category_ids` is given, a full replacement of the
/// category links are written in one transaction.
pub async fn update_by_id(
    db: &DatabaseConnection,
    id: &str,
    payload: UpdateDishPayload,
) -> Result<Dish, Error> {
    let mut tx = db.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {}", err);
        Error::UnexpectedError
    })?;

    if let Some(category_ids) = &payload.category_ids {
        sqlx::query("DELETE FROM dish_categories WHERE dish_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while unlinking dish categories: {}", err);
                Error::UnexpectedError
            })?;

        link_categories(&mut *tx, id, category_ids)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while linking dish categories: {}", err);
                Error::UnexpectedError
            })?;
    }

    let dish = sqlx::query_as::<_, Dish>(
        "
        UPDATE dishes SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            image = CASE WHEN $3 THEN $4 ELSE image END,
            is_vegetarian = COALESCE($5, is_vegetarian),
            spice_level = CASE WHEN $6 THEN $7 ELSE spice_level END,
            price = CASE WHEN $8 THEN $9 ELSE price END,
            updated_at = NOW()
        WHERE
            id = $10
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.image.is_some())
    .bind(payload.image.flatten())
    .bind(payload.is_vegetarian)
    .bind(payload.spice_level.is_some())
    .bind(payload.spice_level.flatten())
    .bind(payload.price.is_some())
    .bind(payload.price.flatten())
    .bind(id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to update dish {}: {}", id, err);
        Error::UnexpectedError
    })?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {}", err);
        Error::UnexpectedError
    })?;

    Ok(dish)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<(), Error> {
    sqlx::query("DELETE FROM dishes WHERE id = $1")
        .bind(id)
        .execute(&db.pool)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while trying to delete dish {}: {}", id, err);
            Error::UnexpectedError
        })
}
