#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use digital_menu_backend::{
    app,
    modules::notification::service::email::Outbox,
    types::{database::DatabaseConnection, AppContext, AppEnvironment, AuthContext, Context},
    utils::{clock::ManualClock, database},
};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::ServiceExt;

/// One Postgres container per test binary. Every test gets its own database on it.
struct SharedPostgres {
    host: String,
    port: u16,
    _container: ContainerAsync<Postgres>,
}

static POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

impl SharedPostgres {
    async fn start() -> Self {
        // RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let container = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .expect("Failed to start Postgres container");
        let host = container.get_host().await.unwrap().to_string();
        let port = container.get_host_port_ipv4(5432).await.unwrap();

        Self {
            host,
            port,
            _container: container,
        }
    }

    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://postgres:postgres@{}:{}/{}",
            self.host, self.port, database
        )
    }
}

/// Creates an empty, migrated database for a single test.
async fn fresh_database() -> DatabaseConnection {
    let postgres = POSTGRES.get_or_init(SharedPostgres::start).await;
    let name = format!("test_{}", ulid::Ulid::new().to_string().to_lowercase());

    let admin = PgPool::connect(&postgres.url("postgres"))
        .await
        .expect("Failed to connect to Postgres");
    sqlx::query(&format!(r#"CREATE DATABASE "{}""#, name))
        .execute(&admin)
        .await
        .expect("Failed to create test database");
    admin.close().await;

    let db_conn = database::connect(&postgres.url(&name))
        .await
        .expect("Failed to connect to test database");
    database::migrate(&db_conn)
        .await
        .expect("Failed to run migrations");
    db_conn
}

pub struct TestApp {
    pub ctx: Arc<Context>,
    pub router: Router,
    pub outbox: Outbox,
    pub clock: Arc<ManualClock>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_master_code(None).await
    }

    pub async fn with_master_code(master_code: Option<&str>) -> Self {
        let outbox = Outbox::new();
        let clock = Arc::new(ManualClock::starting_now());
        let ctx = Arc::new(Context {
            app: AppContext {
                host: "127.0.0.1".to_string(),
                environment: AppEnvironment::Development,
                port: 8000,
                url: "https://menu.example.com".to_string(),
            },
            db_conn: fresh_database().await,
            auth: AuthContext {
                master_code: master_code.map(str::to_string),
            },
            mailer: Arc::new(outbox.clone()),
            clock: clock.clone(),
        });

        Self {
            router: app::router(ctx.clone()),
            ctx,
            outbox,
            clock,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(token), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn send_code(&self, email: &str) -> TestResponse {
        self.post(
            "/api/auth/send-code",
            None,
            json!({ "email": email, "name": "Owner", "country": "Italy" }),
        )
        .await
    }

    pub async fn count(&self, query: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(query)
            .fetch_one(&self.ctx.db_conn.pool)
            .await
            .unwrap()
    }

    /// The code from the most recent verification email sent to `email`.
    pub fn last_code_for(&self, email: &str) -> String {
        let html = self.outbox.last_to(email).unwrap().html;
        let start = html.find("<strong>").unwrap() + "<strong>".len();
        let end = html.find("</strong>").unwrap();
        html[start..end].to_string()
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> TestResponse {
        self.post(
            "/api/auth/verify-code",
            None,
            json!({ "email": email, "code": code }),
        )
        .await
    }

    /// Runs the whole email flow and returns the session token.
    pub async fn sign_in(&self, email: &str) -> String {
        assert_eq!(self.send_code(email).await.status, StatusCode::OK);
        let code = self.last_code_for(email);
        let response = self.verify_code(email, &code).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_restaurant(&self, token: &str, name: &str) -> String {
        let response = self
            .post(
                "/api/restaurants",
                Some(token),
                json!({ "name": name, "location": "Via Roma 1" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_category(&self, token: &str, restaurant_id: &str, name: &str) -> String {
        let response = self
            .post(
                &format!("/api/restaurants/{}/categories", restaurant_id),
                Some(token),
                json!({ "name": name }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_dish(&self, token: &str, restaurant_id: &str, body: Value) -> TestResponse {
        self.post(
            &format!("/api/restaurants/{}/dishes", restaurant_id),
            Some(token),
            body,
        )
        .await
    }
}
