//! Transaction repository.
//!
//! Every method takes the owner ID; rows of other users behave as if they do
//! not exist.

use chrono::{NaiveDate, Utc};
use hamyon_core::transaction::{
    TransactionError as RuleError, TransactionKind, TransactionRecord, validate_amount,
    validate_category_kind, validate_description,
};
use hamyon_shared::Currency;
use hamyon_shared::types::{CategoryId, PageRequest, TransactionId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use super::category::{CategoryError, to_info, visible_to};
use crate::entities::{categories, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found for this owner.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Category not found or not visible to the owner.
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    /// Input violates a domain rule.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Stored row holds a value the domain does not accept.
    #[error("Invalid stored transaction {id}: {reason}")]
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

impl From<CategoryError> for TransactionError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) | CategoryError::Shared(id) => Self::CategoryNotFound(id),
            CategoryError::InvalidData { id, reason } => Self::InvalidData { id, reason },
            CategoryError::DuplicateName(name) => Self::InvalidData {
                id: Uuid::nil(),
                reason: format!("duplicate category {name}"),
            },
            CategoryError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owner.
    pub owner_id: Uuid,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Positive amount in `currency`.
    pub amount: Decimal,
    /// Currency the amount is recorded in.
    pub currency: Currency,
    /// Optional category; must be visible to the owner and of the same kind.
    pub category_id: Option<Uuid>,
    /// Calendar date.
    pub date: NaiveDate,
    /// Free-form description.
    pub description: String,
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New kind.
    pub kind: Option<TransactionKind>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New currency.
    pub currency: Option<Currency>,
    /// New category; `Some(None)` clears it.
    pub category_id: Option<Option<Uuid>>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by kind.
    pub kind: Option<TransactionKind>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Filter by recorded currency.
    pub currency: Option<Currency>,
    /// Filter by category.
    pub category_id: Option<Uuid>,
}

/// Converts a stored row into the domain type.
pub(crate) fn to_record(model: transactions::Model) -> Result<TransactionRecord, TransactionError> {
    let invalid = |reason: String| TransactionError::InvalidData {
        id: model.id,
        reason,
    };
    let kind = model
        .kind
        .parse::<TransactionKind>()
        .map_err(|e| invalid(e.to_string()))?;
    let currency = model
        .currency
        .parse::<Currency>()
        .map_err(|e| invalid(e.to_string()))?;

    Ok(TransactionRecord {
        id: TransactionId::from_uuid(model.id),
        kind,
        amount: model.amount,
        currency,
        category_id: model.category_id.map(CategoryId::from_uuid),
        date: model.date,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn owned(owner_id: Uuid) -> Select<transactions::Entity> {
        transactions::Entity::find().filter(transactions::Column::OwnerId.eq(owner_id))
    }

    async fn check_category(
        &self,
        owner_id: Uuid,
        category_id: Uuid,
        kind: TransactionKind,
    ) -> Result<(), TransactionError> {
        let category = categories::Entity::find_by_id(category_id)
            .filter(visible_to(owner_id))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::CategoryNotFound(category_id))?;
        let category = to_info(category)?;
        validate_category_kind(category.kind, kind)?;
        Ok(())
    }

    /// Creates a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the category is not usable, or
    /// the insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<TransactionRecord, TransactionError> {
        validate_amount(input.amount)?;
        validate_description(&input.description)?;
        if let Some(category_id) = input.category_id {
            self.check_category(input.owner_id, category_id, input.kind)
                .await?;
        }

        let now = Utc::now().into();
        let model = transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            owner_id: Set(input.owner_id),
            kind: Set(input.kind.as_str().to_string()),
            amount: Set(input.amount),
            currency: Set(input.currency.code().to_string()),
            category_id: Set(input.category_id),
            date: Set(input.date),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await?;
        tracing::debug!(transaction_id = %created.id, owner_id = %created.owner_id, "transaction created");
        to_record(created)
    }

    /// Finds a transaction by ID for the owner.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if it does not exist or belongs
    /// to another user.
    pub async fn find(&self, owner_id: Uuid, id: Uuid) -> Result<TransactionRecord, TransactionError> {
        let model = Self::owned(owner_id)
            .filter(transactions::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;
        to_record(model)
    }

    /// Lists the owner's transactions, newest first.
    ///
    /// Returns the page and the total number of matching rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub async fn list(
        &self,
        owner_id: Uuid,
        filter: &TransactionFilter,
        page: &PageRequest,
    ) -> Result<(Vec<TransactionRecord>, u64), TransactionError> {
        let mut query = Self::owned(owner_id);

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::Date.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::Date.lte(date_to));
        }
        if let Some(currency) = filter.currency {
            query = query.filter(transactions::Column::Currency.eq(currency.code()));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }

        let page = page.normalized();
        let paginator = query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        let records = rows
            .into_iter()
            .map(to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((records, total))
    }

    /// Applies an explicit edit by the owner.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` for another user's transaction,
    /// or a validation error if the edited transaction breaks a rule.
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<TransactionRecord, TransactionError> {
        let existing = Self::owned(owner_id)
            .filter(transactions::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;
        let current = to_record(existing.clone())?;

        let kind = input.kind.unwrap_or(current.kind);
        let category_id = input
            .category_id
            .unwrap_or_else(|| current.category_id.map(CategoryId::into_inner));

        if let Some(amount) = input.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &input.description {
            validate_description(description)?;
        }
        if let Some(category_id) = category_id {
            self.check_category(owner_id, category_id, kind).await?;
        }

        let mut active: transactions::ActiveModel = existing.into();
        active.kind = Set(kind.as_str().to_string());
        active.category_id = Set(category_id);
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(currency) = input.currency {
            active.currency = Set(currency.code().to_string());
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        to_record(updated)
    }

    /// Deletes the owner's transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if nothing was deleted.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }
        tracing::debug!(transaction_id = %id, owner_id = %owner_id, "transaction deleted");
        Ok(())
    }
}
