//! Category repository.
//!
//! A user sees their own categories plus the shared ones (`owner_id IS NULL`).
//! Only owned categories can be deleted.

use chrono::Utc;
use hamyon_core::category::CategoryInfo;
use hamyon_core::transaction::TransactionKind;
use hamyon_shared::types::{CategoryId, UserId};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{categories, transactions};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found or not visible to the user.
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    /// Shared categories are read-only.
    #[error("Shared category cannot be modified: {0}")]
    Shared(Uuid),

    /// A visible category with the same name and kind exists.
    #[error("Category already exists: {0}")]
    DuplicateName(String),

    /// Stored row holds a value the domain does not accept.
    #[error("Invalid stored category {id}: {reason}")]
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

/// Input for creating a category. Fields are expected to be validated.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Owner, or `None` for a shared category.
    pub owner_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Icon class.
    pub icon: String,
    /// Hex color.
    pub color: String,
    /// Transaction kind the category applies to.
    pub kind: TransactionKind,
}

/// Converts a stored row into the domain type.
pub(crate) fn to_info(model: categories::Model) -> Result<CategoryInfo, CategoryError> {
    let kind = model
        .kind
        .parse::<TransactionKind>()
        .map_err(|e| CategoryError::InvalidData {
            id: model.id,
            reason: e.to_string(),
        })?;

    Ok(CategoryInfo {
        id: CategoryId::from_uuid(model.id),
        name: model.name,
        icon: model.icon,
        color: model.color,
        kind,
        owner: model.owner_id.map(UserId::from_uuid),
    })
}

/// Condition matching rows visible to `owner_id`.
pub(crate) fn visible_to(owner_id: Uuid) -> Condition {
    Condition::any()
        .add(categories::Column::OwnerId.eq(owner_id))
        .add(categories::Column::OwnerId.is_null())
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists categories visible to the user, shared first, then by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub async fn list_visible(
        &self,
        owner_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<CategoryInfo>, CategoryError> {
        let mut query = categories::Entity::find().filter(visible_to(owner_id));

        if let Some(kind) = kind {
            query = query.filter(categories::Column::Kind.eq(kind.as_str()));
        }

        let rows = query
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;

        let mut result: Vec<CategoryInfo> =
            rows.into_iter().map(to_info).collect::<Result<_, _>>()?;
        // NULL ordering differs between backends.
        result.sort_by(|a, b| {
            b.is_shared()
                .cmp(&a.is_shared())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(result)
    }

    /// Finds a category visible to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is invalid.
    pub async fn find_visible(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CategoryInfo>, CategoryError> {
        categories::Entity::find_by_id(id)
            .filter(visible_to(owner_id))
            .one(&self.db)
            .await?
            .map(to_info)
            .transpose()
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::DuplicateName` if a visible category with the
    /// same name and kind exists.
    pub async fn create(&self, input: CreateCategoryInput) -> Result<CategoryInfo, CategoryError> {
        let scope = match input.owner_id {
            Some(owner_id) => visible_to(owner_id),
            None => Condition::all().add(categories::Column::OwnerId.is_null()),
        };
        let duplicates = categories::Entity::find()
            .filter(scope)
            .filter(categories::Column::Kind.eq(input.kind.as_str()))
            .filter(
                Expr::expr(Func::lower(Expr::col(categories::Column::Name)))
                    .eq(input.name.to_lowercase()),
            )
            .count(&self.db)
            .await?;
        if duplicates > 0 {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let model = categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            owner_id: Set(input.owner_id),
            name: Set(input.name),
            icon: Set(input.icon),
            color: Set(input.color),
            kind: Set(input.kind.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        };

        to_info(model.insert(&self.db).await?)
    }

    /// Deletes a category owned by the user. Its transactions become
    /// uncategorized.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the category is not visible and
    /// `CategoryError::Shared` if it is a shared category.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), CategoryError> {
        let category = categories::Entity::find_by_id(id)
            .filter(visible_to(owner_id))
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        if category.owner_id.is_none() {
            return Err(CategoryError::Shared(id));
        }

        let txn = self.db.begin().await?;

        transactions::Entity::update_many()
            .col_expr(
                transactions::Column::CategoryId,
                Expr::value(Option::<Uuid>::None),
            )
            .filter(transactions::Column::CategoryId.eq(id))
            .filter(transactions::Column::OwnerId.eq(owner_id))
            .exec(&txn)
            .await?;

        categories::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::debug!(category_id = %id, owner_id = %owner_id, "category deleted");
        Ok(())
    }
}
