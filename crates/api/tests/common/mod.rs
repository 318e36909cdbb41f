//! Shared harness for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use pricelist_api::{AppState, create_router};
use pricelist_core::auth::hash_password;
use pricelist_db::migration::{Migrator, MigratorTrait};
use pricelist_db::repositories::CreateCurrencyInput;
use pricelist_db::{CurrencyRepository, UserRepository};
use pricelist_shared::{JwtConfig, JwtService};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use tower::ServiceExt;

pub const USER_EMAIL: &str = "demo@example.com";
pub const USER_PASSWORD: &str = "password123";

/// A router over a fresh in-memory database holding USD, EUR, COP and one user.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub user_id: i32,
    pub usd: i32,
    pub eur: i32,
    pub cop: i32,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None).await.expect("Failed to run migrations");

        let currencies = CurrencyRepository::new(db.clone());
        let mut ids = Vec::new();
        for (name, symbol, rate) in [
            ("US Dollar", "USD", Decimal::new(1_0000, 4)),
            ("Euro", "EUR", Decimal::new(8500, 4)),
            ("Peso Colombiano", "COP", Decimal::new(4000_0000, 4)),
        ] {
            let currency = currencies
                .create(CreateCurrencyInput {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    exchange_rate: rate,
                })
                .await
                .expect("Failed to create currency");
            ids.push(currency.id);
        }

        let hash = hash_password(USER_PASSWORD).expect("Failed to hash password");
        let user = UserRepository::new(db.clone())
            .create("Demo User", USER_EMAIL, &hash)
            .await
            .expect("Failed to create user");

        let state = AppState {
            db: Arc::new(db),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        };

        Self {
            router: create_router(state.clone()),
            state,
            user_id: user.id,
            usd: ids[0],
            eur: ids[1],
            cop: ids[2],
        }
    }

    /// A valid token for the seeded user.
    pub fn token(&self) -> String {
        self.state
            .jwt_service
            .generate_access_token(self.user_id, USER_EMAIL)
            .expect("should generate token")
    }

    /// Sends a request, returning the status and the JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(body)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Sends an authenticated request with an optional JSON body.
    pub async fn authed(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.token();
        self.send(method, uri, Some(&token), body.map(|b| b.to_string()))
            .await
    }
}
