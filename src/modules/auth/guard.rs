//! Ownership checks for restaurant-scoped resources.
//!
//! A resource that exists but belongs to someone else is reported exactly
//! like one that does not exist.

use crate::{
    modules::{
        category::{self, repository::Category},
        dish::{self, repository::Dish},
        restaurant::{self, repository::Restaurant},
        user::repository::User,
    },
    types::Context,
};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    NotFound,
    UnexpectedError,
}

pub async fn restaurant(ctx: &Context, user: &User, restaurant_id: &str) -> Result<Restaurant, Error> {
    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn, restaurant_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::NotFound)?;

    if !restaurant::repository::is_owner(user, &restaurant) {
        tracing::debug!(
            "User {} tried to reach restaurant {} owned by {}",
            user.id,
            restaurant.id,
            restaurant.user_id
        );
        return Err(Error::NotFound);
    }

    Ok(restaurant)
}

pub async fn category(ctx: &Context, user: &User, category_id: &str) -> Result<Category, Error> {
    let category = category::repository::find_by_id(&ctx.db_conn, category_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::NotFound)?;

    restaurant(ctx, user, &category.restaurant_id).await?;

    Ok(category)
}

pub async fn dish(ctx: &Context, user: &User, dish_id: &str) -> Result<Dish, Error> {
    let dish = dish::repository::find_by_id(&ctx.db_conn, dish_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::NotFound)?;

    restaurant(ctx, user, &dish.restaurant_id).await?;

    Ok(dish)
}
