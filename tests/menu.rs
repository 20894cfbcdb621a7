mod common;

use axum::http::{header, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn public_menu_needs_no_session() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;
    let restaurant_id = app.create_restaurant(&token, "Trattoria Luca").await;
    let pasta = app.create_category(&token, &restaurant_id, "Pasta").await;
    let antipasti = app
        .create_category(&token, &restaurant_id, "Antipasti")
        .await;
    app.create_category(&token, &restaurant_id, "Desserts")
        .await;

    for body in [
        json!({
            "name": "Tagliatelle",
            "description": "Ragu",
            "price": "9.5",
            "category_ids": [pasta],
        }),
        json!({
            "name": "Bruschetta",
            "description": "Tomato",
            "category_ids": [antipasti, pasta],
        }),
        json!({ "name": "Acqua", "description": "Still water" }),
    ] {
        let response = app.create_dish(&token, &restaurant_id, body).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = app
        .get(&format!("/api/public/menu/{}", restaurant_id), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let menu = response.body;
    assert_eq!(menu["restaurant"]["name"], "Trattoria Luca");
    assert!(menu["restaurant"].get("user_id").is_none());

    let categories = menu["categories"].as_array().unwrap();
    let names = categories
        .iter()
        .map(|category| category["name"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Antipasti", "Desserts", "Pasta"]);

    let pasta_dishes = categories[2]["dishes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|dish| dish["name"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(pasta_dishes, ["Bruschetta", "Tagliatelle"]);
    assert!(categories[1]["dishes"].as_array().unwrap().is_empty());

    let all_dishes = menu["all_dishes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|dish| dish["name"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(all_dishes, ["Acqua", "Bruschetta", "Tagliatelle"]);
    assert_eq!(menu["all_dishes"][2]["price"], "9.50");
    assert!(menu["all_dishes"][0]["price"].is_null());
}

#[tokio::test]
async fn unknown_restaurant_has_no_menu() {
    let app = TestApp::new().await;

    let response = app
        .get("/api/public/menu/01JAAAAAAAAAAAAAAAAAAAAAAA", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Restaurant not found");
}

#[tokio::test]
async fn admin_pages_redirect_anonymous_visitors() {
    let app = TestApp::new().await;

    let response = app.get("/admin/restaurants", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers.get(header::LOCATION).unwrap(),
        "/auth/login"
    );

    let response = app.get("/admin", Some("expired-or-fake")).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn admin_pages_let_signed_in_owners_through() {
    let app = TestApp::new().await;
    let token = app.sign_in("owner@bistro.test").await;

    let response = app.get("/admin/restaurants", Some(&token)).await;
    assert_ne!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn menu_pages_are_never_redirected() {
    let app = TestApp::new().await;

    let response = app.get("/menu/01JAAAAAAAAAAAAAAAAAAAAAAA", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
