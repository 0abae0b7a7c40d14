#![allow(dead_code)]

use oxide_dialect::prelude::*;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub async fn create_test_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool")
}

pub async fn execute(pool: &SqlitePool, sql: &str) {
    sqlx::query(sql)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to execute: {sql}\nError: {e:?}"));
}

/// Creates `users` with an unquoted table name, one quoted column and an
/// unquoted index on `email`.
pub async fn create_users(pool: &SqlitePool) {
    execute(
        pool,
        "CREATE TABLE users (id INTEGER PRIMARY KEY, \"email\" TEXT, name TEXT)",
    )
    .await;
    execute(pool, "CREATE INDEX idx_users_email ON users (email)").await;
}

pub fn structured() -> SqliteDialect {
    SqliteDialect::with_options(
        DialectOptions::new().catalog_matching(CatalogMatching::Structured),
    )
}
