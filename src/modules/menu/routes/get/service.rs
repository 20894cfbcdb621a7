use super::types::{request, response};
use crate::{
    modules::{
        category::{self, repository::Category},
        dish::{self, repository::DishWithCategories},
        restaurant::{self, repository::Restaurant},
    },
    types::Context,
};
use std::sync::Arc;

fn menu_dish(dish: &DishWithCategories) -> response::MenuDish {
    response::MenuDish {
        id: dish.dish.id.clone(),
        name: dish.dish.name.clone(),
        description: dish.dish.description.clone(),
        image: dish.dish.image.clone(),
        is_vegetarian: dish.dish.is_vegetarian,
        spice_level: dish.dish.spice_level,
        price: dish.dish.price.clone(),
    }
}

/// Groups the dishes under their categories. Categories and dishes come out
/// sorted by name; a dish shows up under every category it is linked to.
pub fn assemble(
    restaurant: Restaurant,
    mut categories: Vec<Category>,
    mut dishes: Vec<DishWithCategories>,
) -> response::Menu {
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    dishes.sort_by(|a, b| a.dish.name.cmp(&b.dish.name));

    let categories = categories
        .into_iter()
        .map(|category| response::MenuCategory {
            dishes: dishes
                .iter()
                .filter(|dish| dish.categories.iter().any(|c| c.id == category.id))
                .map(menu_dish)
                .collect(),
            id: category.id,
            name: category.name,
        })
        .collect();

    response::Menu {
        restaurant: response::MenuRestaurant {
            id: restaurant.id,
            name: restaurant.name,
            location: restaurant.location,
        },
        categories,
        all_dishes: dishes.iter().map(menu_dish).collect(),
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = restaurant::repository::find_by_id(&ctx.db_conn, &payload.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToFetchMenu)?
        .ok_or(response::Error::RestaurantNotFound)?;

    let categories = category::repository::find_many_by_restaurant_id(&ctx.db_conn, &restaurant.id)
        .await
        .map_err(|_| response::Error::FailedToFetchMenu)?;

    let dishes = dish::repository::find_many_by_restaurant_id(&ctx.db_conn, &restaurant.id)
        .await
        .map_err(|_| response::Error::FailedToFetchMenu)?;

    Ok(response::Success::Menu(assemble(
        restaurant, categories, dishes,
    )))
}
