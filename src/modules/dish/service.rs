use itertools::Itertools;

use crate::{modules::category, types::Context};

#[derive(Debug)]
pub enum Error {
    InvalidCategories,
    UnexpectedError,
}

/// Deduplicates the ids and checks that every one of them names a category
/// of the restaurant.
pub async fn check_categories(
    ctx: &Context,
    restaurant_id: &str,
    category_ids: Vec<String>,
) -> Result<Vec<String>, Error> {
    let category_ids = category_ids.into_iter().unique().collect::<Vec<_>>();
    if category_ids.is_empty() {
        return Ok(category_ids);
    }

    let found = category::repository::find_many_by_ids_and_restaurant_id(
        &ctx.db_conn,
        &category_ids,
        restaurant_id,
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    if found.len() != category_ids.len() {
        tracing::debug!(
            "Only {} of {} categories belong to restaurant {}",
            found.len(),
            category_ids.len(),
            restaurant_id
        );
        return Err(Error::InvalidCategories);
    }

    Ok(category_ids)
}
