//! Category repository over the in-memory store.

use market_core::{Category, CategoryDraft, CategoryId};

use super::{Store, StoreError};

/// Repository for category operations.
pub struct CategoryRepository<'a> {
    store: &'a Store,
}

impl<'a> CategoryRepository<'a> {
    pub(crate) const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a category with a store-assigned id.
    pub async fn create(&self, draft: CategoryDraft) -> Result<Category, StoreError> {
        let mut state = self.store.write().await;
        let category = Category {
            id: CategoryId::generate(),
            name: draft.name,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    /// List every category in insertion order.
    pub async fn find_all(&self) -> Vec<Category> {
        self.store.read().await.categories.clone()
    }

    /// Fetch one category by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id has no record.
    pub async fn find(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.store
            .read()
            .await
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Category"))
    }

    /// Replace a category's name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id has no record.
    pub async fn update(&self, id: CategoryId, draft: CategoryDraft) -> Result<Category, StoreError> {
        let mut state = self.store.write().await;
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound("Category"))?;
        category.name = draft.name;
        Ok(category.clone())
    }

    /// Delete a category by id.
    ///
    /// Deletion is forbidden while any product references the category, so
    /// dangling references cannot form.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id has no record and
    /// `StoreError::Conflict` if the category is still referenced. The
    /// collection is unchanged on either failure.
    pub async fn delete(&self, id: CategoryId) -> Result<(), StoreError> {
        let mut state = self.store.write().await;
        let position = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound("Category"))?;
        if state.products.iter().any(|p| p.category == id) {
            return Err(StoreError::Conflict(
                "Category is referenced by existing products".to_owned(),
            ));
        }
        state.categories.remove(position);
        Ok(())
    }

    /// Number of stored categories.
    pub async fn count(&self) -> usize {
        self.store.read().await.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use market_core::{Price, ProductDraft};

    use super::*;

    fn named(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_owned(),
        }
    }

    #[tokio::test]
    async fn create_update_delete_round_trip() {
        let store = Store::new();
        let created = store.categories().create(named("Food")).await.expect("create");

        let updated = store
            .categories()
            .update(created.id, named("Groceries"))
            .await
            .expect("update");
        assert_eq!(updated.name, "Groceries");
        assert_eq!(store.categories().find(created.id).await.expect("find"), updated);

        store.categories().delete(created.id).await.expect("delete");
        assert!(matches!(
            store.categories().find(created.id).await,
            Err(StoreError::NotFound("Category"))
        ));
    }

    #[tokio::test]
    async fn deleting_a_referenced_category_is_forbidden() {
        let store = Store::new();
        let category = store.categories().create(named("Food")).await.expect("create");
        store
            .products()
            .create(ProductDraft {
                name: "Bread".to_owned(),
                description: String::new(),
                category: category.id,
                stock: 1,
                price: Price::ZERO,
                image: None,
            })
            .await
            .expect("create product");

        let result = store.categories().delete(category.id).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(store.categories().count().await, 1);

        // Removing the referencing product unblocks the delete.
        let products = store.products().find_all().await.expect("list");
        let product_id = products.first().map(|p| p.id).expect("one product");
        store.products().delete(product_id).await.expect("delete product");
        store.categories().delete(category.id).await.expect("delete category");
    }
}
