//! `SeaORM` entity definitions.

pub mod categories;
pub mod transactions;
pub mod users;

pub use categories::Entity as Category;
pub use transactions::Entity as Transaction;
pub use users::Entity as User;
