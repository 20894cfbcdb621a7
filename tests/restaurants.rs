mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn owner_manages_restaurants() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;

    let id = app.create_restaurant(&token, "Trattoria Luca").await;

    let response = app.get("/api/restaurants", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
    assert_eq!(response.body[0]["name"], "Trattoria Luca");

    let response = app
        .patch(
            &format!("/api/restaurants/{}", id),
            &token,
            json!({ "location": "Piazza Duomo 3" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Trattoria Luca");
    assert_eq!(response.body["location"], "Piazza Duomo 3");

    let response = app
        .get(&format!("/api/restaurants/{}/menu-link", id), Some(&token))
        .await;
    assert_eq!(
        response.body["url"],
        format!("https://menu.example.com/menu/{}", id)
    );

    let response = app.delete(&format!("/api/restaurants/{}", id), &token).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .get(&format!("/api/restaurants/{}", id), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_restaurant_fields_are_rejected() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;

    let response = app
        .post(
            "/api/restaurants",
            Some(&token),
            json!({ "name": "", "location": "Via Roma 1" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_owners_see_not_found() {
    let app = TestApp::new().await;
    let owner = app.sign_in("owner@bistro.test").await;
    let intruder = app.sign_in("intruder@bistro.test").await;

    let restaurant_id = app.create_restaurant(&owner, "Trattoria Luca").await;
    let category_id = app
        .create_category(&owner, &restaurant_id, "Pasta")
        .await;
    let dish = app
        .create_dish(
            &owner,
            &restaurant_id,
            json!({ "name": "Carbonara", "description": "Guanciale and pecorino" }),
        )
        .await;
    let dish_id = dish.body["id"].as_str().unwrap().to_string();

    let missing = app
        .get("/api/restaurants/01JAAAAAAAAAAAAAAAAAAAAAAA", Some(&owner))
        .await;
    let foreign = app
        .get(&format!("/api/restaurants/{}", restaurant_id), Some(&intruder))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.body, missing.body);

    let response = app
        .patch(
            &format!("/api/categories/{}", category_id),
            &intruder,
            json!({ "name": "Stolen" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .get(
            &format!("/api/restaurants/{}/categories", restaurant_id),
            Some(&owner),
        )
        .await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
    assert_eq!(response.body[0]["name"], "Pasta");

    let response = app
        .delete(&format!("/api/dishes/{}", dish_id), &intruder)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .create_dish(
            &intruder,
            &restaurant_id,
            json!({ "name": "Intruder", "description": "Should not exist" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.get("/api/restaurants", Some(&intruder)).await;
    assert!(response.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn dishes_carry_their_categories() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;
    let restaurant_id = app.create_restaurant(&token, "Trattoria Luca").await;
    let pasta = app.create_category(&token, &restaurant_id, "Pasta").await;
    let specials = app
        .create_category(&token, &restaurant_id, "Specials")
        .await;

    let response = app
        .create_dish(
            &token,
            &restaurant_id,
            json!({
                "name": "Carbonara",
                "description": "Guanciale and pecorino",
                "is_vegetarian": false,
                "spice_level": 1,
                "price": "12.50",
                "category_ids": [pasta, specials],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["price"], "12.50");
    let dish_id = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .get(
            &format!("/api/restaurants/{}/dishes", restaurant_id),
            Some(&token),
        )
        .await;
    assert_eq!(response.body[0]["categories"].as_array().unwrap().len(), 2);
    assert_eq!(response.body[0]["price"], "12.50");

    let response = app
        .patch(
            &format!("/api/dishes/{}", dish_id),
            &token,
            json!({ "category_ids": [specials], "price": null }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["price"].is_null());
    assert_eq!(response.body["name"], "Carbonara");

    let response = app
        .get(
            &format!("/api/restaurants/{}/dishes", restaurant_id),
            Some(&token),
        )
        .await;
    let categories = response.body[0]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"], specials.as_str());

    let response = app
        .delete(&format!("/api/categories/{}", specials), &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .get(
            &format!("/api/restaurants/{}/dishes", restaurant_id),
            Some(&token),
        )
        .await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
    assert!(response.body[0]["categories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn foreign_categories_are_rejected() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;
    let first = app.create_restaurant(&token, "Trattoria Luca").await;
    let second = app.create_restaurant(&token, "Pizzeria Gino").await;
    let pizza = app.create_category(&token, &second, "Pizza").await;

    let response = app
        .create_dish(
            &token,
            &first,
            json!({
                "name": "Margherita",
                "description": "Tomato and mozzarella",
                "category_ids": [pizza],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Some categories not found or don't belong to this restaurant"
    );

    let response = app
        .get(&format!("/api/restaurants/{}/dishes", first), Some(&token))
        .await;
    assert!(response.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn dish_fields_are_validated() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;
    let restaurant_id = app.create_restaurant(&token, "Trattoria Luca").await;

    for body in [
        json!({ "name": "Arrabbiata", "description": "Hot", "spice_level": 6 }),
        json!({ "name": "Arrabbiata", "description": "Hot", "price": "-1" }),
        json!({ "name": "Arrabbiata", "description": "Hot", "image": "not a url" }),
        json!({ "name": "", "description": "Hot" }),
    ] {
        let response = app.create_dish(&token, &restaurant_id, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn deleting_a_restaurant_removes_its_menu() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;
    let restaurant_id = app.create_restaurant(&token, "Trattoria Luca").await;
    let pasta = app.create_category(&token, &restaurant_id, "Pasta").await;
    app.create_dish(
        &token,
        &restaurant_id,
        json!({ "name": "Carbonara", "description": "Guanciale", "category_ids": [pasta] }),
    )
    .await;

    app.delete(&format!("/api/restaurants/{}", restaurant_id), &token)
        .await;

    let response = app
        .get(&format!("/api/public/menu/{}", restaurant_id), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
