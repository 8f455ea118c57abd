//! Database seeder for Hamyon development and testing.
//!
//! Seeds the shared default categories, a demo user and three months of
//! sample transactions in mixed currencies.
//!
//! Usage: cargo run --bin seeder
//!
//! Reads `DATABASE_URL`. Safe to run repeatedly: existing rows are kept.

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use hamyon_core::auth::hash_password;
use hamyon_core::category::CategoryInfo;
use hamyon_core::transaction::TransactionKind;
use hamyon_db::Migrator;
use hamyon_db::repositories::{
    CategoryError, CategoryRepository, CreateCategoryInput, CreateTransactionInput,
    TransactionRepository, UserRepository,
};
use hamyon_shared::Currency;

const DEMO_EMAIL: &str = "demo@hamyon.uz";
const DEMO_PASSWORD: &str = "demo12345";

/// Shared categories: name, icon, color, kind.
const DEFAULT_CATEGORIES: [(&str, &str, &str, TransactionKind); 9] = [
    ("Maosh", "fas fa-money-bill-wave", "#10b981", TransactionKind::Income),
    ("Frilans", "fas fa-laptop-code", "#06b6d4", TransactionKind::Income),
    ("Sovg'a", "fas fa-gift", "#8b5cf6", TransactionKind::Income),
    ("Oziq-ovqat", "fas fa-shopping-cart", "#ef4444", TransactionKind::Expense),
    ("Transport", "fas fa-bus", "#f59e0b", TransactionKind::Expense),
    ("Kommunal", "fas fa-bolt", "#3b82f6", TransactionKind::Expense),
    ("Sog'liq", "fas fa-heartbeat", "#ec4899", TransactionKind::Expense),
    ("Ko'ngilochar", "fas fa-film", "#a855f7", TransactionKind::Expense),
    ("Kiyim", "fas fa-tshirt", "#64748b", TransactionKind::Expense),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = hamyon_db::connect(&database_url).await?;
    Migrator::up(&db, None).await?;

    println!("Seeding default categories...");
    let categories = seed_default_categories(&db).await?;

    println!("Seeding demo user...");
    let Some(user_id) = seed_demo_user(&db).await? else {
        println!("  Demo user already exists, skipping transactions");
        println!("Seeding complete!");
        return Ok(());
    };

    println!("Seeding sample transactions...");
    seed_transactions(&db, user_id, &categories).await?;

    println!("Seeding complete!");
    println!("  Login: {DEMO_EMAIL} / {DEMO_PASSWORD}");
    Ok(())
}

/// Creates missing shared categories and returns all of them.
async fn seed_default_categories(db: &DatabaseConnection) -> anyhow::Result<Vec<CategoryInfo>> {
    let repo = CategoryRepository::new(db.clone());
    let mut inserted = 0;

    for (name, icon, color, kind) in DEFAULT_CATEGORIES {
        let input = CreateCategoryInput {
            owner_id: None,
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            kind,
        };
        match repo.create(input).await {
            Ok(_) => inserted += 1,
            Err(CategoryError::DuplicateName(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    println!("  Inserted {inserted} categories");

    // Shared categories are visible to any user ID.
    Ok(repo.list_visible(Uuid::nil(), None).await?)
}

/// Creates the demo user, or returns `None` if it exists.
async fn seed_demo_user(db: &DatabaseConnection) -> anyhow::Result<Option<Uuid>> {
    let repo = UserRepository::new(db.clone());
    if repo.email_exists(DEMO_EMAIL).await? {
        return Ok(None);
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;
    let user = repo.create(DEMO_EMAIL, &password_hash, "Demo User").await?;
    Ok(Some(user.id))
}

fn category_id(categories: &[CategoryInfo], name: &str) -> Option<Uuid> {
    categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id.into_inner())
}

/// Inserts a salary per month plus an expense every third day over the
/// last 90 days.
async fn seed_transactions(
    db: &DatabaseConnection,
    owner_id: Uuid,
    categories: &[CategoryInfo],
) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let input = |kind, amount: i64, currency, category: &str, date: NaiveDate, description: &str| {
        CreateTransactionInput {
            owner_id,
            kind,
            amount: Decimal::from(amount),
            currency,
            category_id: category_id(categories, category),
            date,
            description: description.to_string(),
        }
    };

    let mut inputs: Vec<CreateTransactionInput> = (0..3)
        .map(|month| {
            input(
                TransactionKind::Income,
                900,
                Currency::Usd,
                "Maosh",
                today - Duration::days(month * 30),
                "Oylik maosh",
            )
        })
        .collect();
    inputs.push(input(
        TransactionKind::Income,
        250,
        Currency::Eur,
        "Frilans",
        today - Duration::days(12),
        "Veb-sayt loyihasi",
    ));

    let expenses = [
        ("Oziq-ovqat", 185_000, Currency::Uzs, "Bozor"),
        ("Transport", 12_000, Currency::Uzs, "Metro va avtobus"),
        ("Kommunal", 450_000, Currency::Uzs, "Elektr va gaz"),
        ("Ko'ngilochar", 1_500, Currency::Rub, "Kino"),
        ("Kiyim", 320, Currency::Cny, "Kurtka"),
        ("Sog'liq", 95_000, Currency::Uzs, "Dorixona"),
    ];
    for (i, day) in (0..90).step_by(3).enumerate() {
        let (category, amount, currency, description) = expenses[i % expenses.len()];
        inputs.push(input(
            TransactionKind::Expense,
            amount,
            currency,
            category,
            today - Duration::days(day),
            description,
        ));
    }

    let repo = TransactionRepository::new(db.clone());
    let count = inputs.len();
    for input in inputs {
        repo.create(input).await?;
    }

    println!("  Inserted {count} transactions");
    Ok(())
}
