#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use postboard::{
    app::build_app,
    auth::password::hash_password,
    config::AppConfig,
    state::AppState,
    users::{NewUser, User},
};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused".into()),
        "JWT_SECRET" => Some("integration-secret".into()),
        _ => None,
    })
    .expect("test config")
}

pub fn app(pool: PgPool) -> Router {
    build_app(AppState::from_parts(pool, Arc::new(test_config())))
}

pub async fn insert_user(pool: &PgPool, name: &str, email: &str) -> anyhow::Result<User> {
    let hash = hash_password("password123")?;
    User::create(
        pool,
        &NewUser {
            name,
            email,
            password_hash: &hash,
            photo: None,
            verification_code: None,
        },
    )
    .await
}

pub async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(json) => req
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
