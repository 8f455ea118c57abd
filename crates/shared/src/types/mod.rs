//! Common types used across the application.

pub mod currency;
pub mod id;
pub mod pagination;

pub use currency::{Currency, UnsupportedCurrency};
pub use id::*;
pub use pagination::{PageMeta, PageRequest, PageResponse};
