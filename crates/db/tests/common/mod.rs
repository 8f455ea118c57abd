//! Shared helpers for repository integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use hamyon_core::category::{DEFAULT_COLOR, DEFAULT_ICON};
use hamyon_core::transaction::TransactionKind;
use hamyon_db::Migrator;
use hamyon_db::repositories::{CategoryRepository, CreateCategoryInput};
use hamyon_db::UserRepository;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

/// Creates an in-memory SQLite database with the schema applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Registers a user and returns its ID.
pub async fn create_user(db: &DatabaseConnection, email: &str) -> Uuid {
    UserRepository::new(db.clone())
        .create(email, "$argon2id$test_hash", "Test User")
        .await
        .expect("create user")
        .id
}

/// Creates a category with default icon and color.
pub async fn create_category(
    db: &DatabaseConnection,
    owner_id: Option<Uuid>,
    name: &str,
    kind: TransactionKind,
) -> Uuid {
    CategoryRepository::new(db.clone())
        .create(CreateCategoryInput {
            owner_id,
            name: name.to_string(),
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
            kind,
        })
        .await
        .expect("create category")
        .id
        .into_inner()
}

/// Shorthand for a calendar date.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
