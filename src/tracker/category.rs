//! Category management

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::traits::*;
use crate::types::*;

/// Category manager for handling category operations
pub struct CategoryManager<S: TrackerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn CategoryValidator>,
}

impl<S: TrackerStorage> CategoryManager<S> {
    /// Create a new category manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultCategoryValidator),
        }
    }

    /// Create a new category manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn CategoryValidator>) -> Self {
        Self { storage, validator }
    }

    /// Add a category with the default icon for its kind
    pub async fn add_category(
        &mut self,
        name: String,
        kind: TransactionType,
    ) -> TrackerResult<Category> {
        self.save_new(Category::new(name.trim().to_string(), kind)).await
    }

    /// Add a fully specified category
    pub async fn save_new(&mut self, category: Category) -> TrackerResult<Category> {
        self.validator.validate_category(&category)?;

        if self.find_by_name(&category.name, category.kind).await?.is_some() {
            warn!(name = %category.name, "duplicate category");
            return Err(TrackerError::Validation(format!(
                "Category '{}' already exists for {}",
                category.name, category.kind
            )));
        }

        self.storage.save_category(&category).await?;
        info!(name = %category.name, kind = %category.kind, "added category");
        Ok(category)
    }

    /// Check categories arriving from a backup without writing them.
    ///
    /// Names must pass the validator and stay unique per kind, both within the
    /// batch and against stored categories with a different id.
    pub async fn validate_incoming(&self, categories: &[Category]) -> TrackerResult<()> {
        let stored = self.storage.list_categories(None).await?;
        let mut seen: HashMap<(TransactionType, &str), &str> = HashMap::new();

        for category in categories {
            self.validator.validate_category(category)?;

            let clash_in_batch = seen
                .insert((category.kind, category.name.as_str()), category.id.as_str())
                .is_some_and(|id| id != category.id);
            let clash_in_storage = stored.iter().any(|existing| {
                existing.kind == category.kind
                    && existing.name == category.name
                    && existing.id != category.id
            });

            if clash_in_batch || clash_in_storage {
                warn!(name = %category.name, "duplicate category in import");
                return Err(TrackerError::Validation(format!(
                    "Category '{}' already exists for {}",
                    category.name, category.kind
                )));
            }
        }

        Ok(())
    }

    /// Look up a category by name within one kind
    pub async fn find_by_name(
        &self,
        name: &str,
        kind: TransactionType,
    ) -> TrackerResult<Option<Category>> {
        Ok(self
            .storage
            .list_categories(Some(kind))
            .await?
            .into_iter()
            .find(|category| category.name == name))
    }

    /// List categories, optionally of one kind
    pub async fn list_categories(
        &self,
        kind: Option<TransactionType>,
    ) -> TrackerResult<Vec<Category>> {
        self.storage.list_categories(kind).await
    }

    /// Delete a category; existing transactions keep their category name
    pub async fn delete_category(&mut self, category_id: &str) -> TrackerResult<()> {
        self.storage.delete_category(category_id).await?;
        info!(id = %category_id, "deleted category");
        Ok(())
    }
}

/// Common category setups
pub mod utils {
    use super::*;

    /// Categories offered on a fresh install
    pub const DEFAULT_CATEGORIES: &[(&str, TransactionType, &str)] = &[
        ("Salary", TransactionType::Income, "💼"),
        ("Bonus", TransactionType::Income, "🎁"),
        ("Investment", TransactionType::Income, "📈"),
        ("Other Income", TransactionType::Income, "💰"),
        ("Food", TransactionType::Expense, "🍜"),
        ("Transport", TransactionType::Expense, "🚌"),
        ("Shopping", TransactionType::Expense, "🛍️"),
        ("Entertainment", TransactionType::Expense, "🎬"),
        ("Bills", TransactionType::Expense, "🧾"),
        ("Health", TransactionType::Expense, "💊"),
        ("Other Expense", TransactionType::Expense, "💸"),
    ];

    /// Add any missing default categories; existing ones are left alone
    pub async fn create_default_categories<S: TrackerStorage>(
        category_manager: &mut CategoryManager<S>,
    ) -> TrackerResult<Vec<Category>> {
        let mut created = Vec::new();

        for (name, kind, icon) in DEFAULT_CATEGORIES {
            if category_manager.find_by_name(name, *kind).await?.is_some() {
                debug!(name, "default category already present");
                continue;
            }
            let category = Category::new(name.to_string(), *kind).with_icon(*icon);
            created.push(category_manager.save_new(category).await?);
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn test_duplicate_name_rejected_per_kind() {
        let mut manager = CategoryManager::new(MemoryStorage::new());
        manager
            .add_category("Gifts".to_string(), TransactionType::Expense)
            .await
            .unwrap();

        let duplicate = manager
            .add_category("Gifts".to_string(), TransactionType::Expense)
            .await;
        assert!(matches!(duplicate, Err(TrackerError::Validation(_))));

        // Same name on the other side is fine
        let income = manager
            .add_category("Gifts".to_string(), TransactionType::Income)
            .await
            .unwrap();
        assert_eq!(income.icon, "💰");
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let mut manager = CategoryManager::new(MemoryStorage::new());
        let result = manager
            .add_category("   ".to_string(), TransactionType::Expense)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_default_categories_are_idempotent() {
        let mut manager = CategoryManager::new(MemoryStorage::new());
        let first = utils::create_default_categories(&mut manager).await.unwrap();
        assert_eq!(first.len(), utils::DEFAULT_CATEGORIES.len());

        let second = utils::create_default_categories(&mut manager).await.unwrap();
        assert!(second.is_empty());

        let expense = manager
            .list_categories(Some(TransactionType::Expense))
            .await
            .unwrap();
        assert_eq!(expense.len(), 7);
    }
}
