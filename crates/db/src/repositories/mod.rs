//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query that touches user data takes the owner ID and filters by it.

pub mod category;
pub mod dashboard;
pub mod transaction;
pub mod user;

pub use category::{CategoryError, CategoryRepository, CreateCategoryInput};
pub use dashboard::{DashboardError, DashboardRepository};
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
pub use user::{UserError, UserRepository};
