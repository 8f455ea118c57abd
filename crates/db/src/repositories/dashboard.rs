//! Read-side queries feeding the dashboard aggregator.
//!
//! Aggregation happens in `hamyon_core::dashboard`; this module only loads the
//! owner's rows and converts them to domain types.

use hamyon_core::category::CategoryInfo;
use hamyon_core::period::DateWindow;
use hamyon_core::transaction::TransactionRecord;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::category::{CategoryError, to_info, visible_to};
use super::transaction::{TransactionError, to_record};
use crate::entities::{categories, transactions};

/// Error types for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Stored row holds a value the domain does not accept.
    #[error("Invalid stored data {id}: {reason}")]
    InvalidData {
        /// Row ID.
        id: Uuid,
        /// What was wrong.
        reason: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for DashboardError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Database(e) => Self::Database(e),
            TransactionError::InvalidData { id, reason } => Self::InvalidData { id, reason },
            other => Self::InvalidData {
                id: Uuid::nil(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<CategoryError> for DashboardError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::Database(e) => Self::Database(e),
            CategoryError::InvalidData { id, reason } => Self::InvalidData { id, reason },
            other => Self::InvalidData {
                id: Uuid::nil(),
                reason: other.to_string(),
            },
        }
    }
}

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every transaction owned by the user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub async fn load_records(&self, owner_id: Uuid) -> Result<Vec<TransactionRecord>, DashboardError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        tracing::debug!(owner_id = %owner_id, count = rows.len(), "loaded dashboard records");

        let records = rows
            .into_iter()
            .map(to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Loads the user's transactions dated inside `window`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub async fn load_records_in(
        &self,
        owner_id: Uuid,
        window: &DateWindow,
    ) -> Result<Vec<TransactionRecord>, DashboardError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .filter(transactions::Column::Date.between(window.start, window.end))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        tracing::debug!(
            owner_id = %owner_id,
            start = %window.start,
            end = %window.end,
            count = rows.len(),
            "loaded dashboard records in window"
        );

        let records = rows
            .into_iter()
            .map(to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Loads the categories visible to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub async fn load_categories(&self, owner_id: Uuid) -> Result<Vec<CategoryInfo>, DashboardError> {
        let rows = categories::Entity::find()
            .filter(visible_to(owner_id))
            .all(&self.db)
            .await?;

        let categories = rows
            .into_iter()
            .map(to_info)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }
}
