//! Product repository over the in-memory store.

use market_core::{Category, Product, ProductDraft, ProductId, ProductView};

use super::{Collections, Store, StoreError};

/// Repository for product operations.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    pub(crate) const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a product with a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidReference` if the draft's category does
    /// not resolve; the collection is left unchanged in that case.
    pub async fn create(&self, draft: ProductDraft) -> Result<ProductView, StoreError> {
        let mut state = self.store.write().await;
        let category = resolve_category(&state, &draft)?;
        let product = Product {
            id: ProductId::generate(),
            name: draft.name,
            description: draft.description,
            category: category.id,
            stock: draft.stock,
            price: draft.price,
            image: draft.image,
        };
        state.products.push(product.clone());
        Ok(populate(product, category))
    }

    /// List every product in insertion order, categories populated.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DataCorruption` if a product carries a dangling
    /// category reference.
    pub async fn find_all(&self) -> Result<Vec<ProductView>, StoreError> {
        let state = self.store.read().await;
        state
            .products
            .iter()
            .map(|product| populate_from(&state.categories, product.clone()))
            .collect()
    }

    /// Fetch one product by id, category populated.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id has no record.
    pub async fn find(&self, id: ProductId) -> Result<ProductView, StoreError> {
        let state = self.store.read().await;
        let product = state
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("Product"))?;
        populate_from(&state.categories, product)
    }

    /// Replace every mutable field of a product.
    ///
    /// This is a full replace: a draft without an image clears any image the
    /// record previously carried.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id has no record and
    /// `StoreError::InvalidReference` if the draft's category does not
    /// resolve. The record is unchanged on either failure.
    pub async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<ProductView, StoreError> {
        let mut state = self.store.write().await;
        let category = resolve_category(&state, &draft)?;
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound("Product"))?;
        product.name = draft.name;
        product.description = draft.description;
        product.category = category.id;
        product.stock = draft.stock;
        product.price = draft.price;
        product.image = draft.image;
        Ok(populate(product.clone(), category))
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id has no record; the
    /// collection is left unchanged.
    pub async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut state = self.store.write().await;
        let position = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound("Product"))?;
        state.products.remove(position);
        Ok(())
    }

    /// Number of stored products.
    pub async fn count(&self) -> usize {
        self.store.read().await.products.len()
    }
}

fn resolve_category(state: &Collections, draft: &ProductDraft) -> Result<Category, StoreError> {
    state
        .categories
        .iter()
        .find(|c| c.id == draft.category)
        .cloned()
        .ok_or(StoreError::InvalidReference("Category"))
}

fn populate_from(categories: &[Category], product: Product) -> Result<ProductView, StoreError> {
    let category = categories
        .iter()
        .find(|c| c.id == product.category)
        .cloned()
        .ok_or_else(|| {
            StoreError::DataCorruption(format!(
                "product {} references missing category {}",
                product.id, product.category
            ))
        })?;
    Ok(populate(product, category))
}

fn populate(product: Product, category: Category) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name,
        description: product.description,
        category,
        stock: product.stock,
        price: product.price,
        image: product.image,
    }
}

#[cfg(test)]
mod tests {
    use market_core::{CategoryDraft, CategoryId, Price};

    use super::*;

    async fn store_with_category() -> (Store, CategoryId) {
        let store = Store::new();
        let category = store
            .categories()
            .create(CategoryDraft {
                name: "Appliances".to_owned(),
            })
            .await
            .expect("create category");
        (store, category.id)
    }

    fn draft(category: CategoryId) -> ProductDraft {
        ProductDraft {
            name: "Kettle".to_owned(),
            description: "1.7L electric kettle".to_owned(),
            category,
            stock: 4,
            price: Price::from_cents(2499).expect("price"),
            image: Some("https://img.example/kettle.png".to_owned()),
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trips_modulo_id() {
        let (store, category) = store_with_category().await;
        let input = draft(category);
        let created = store.products().create(input.clone()).await.expect("create");
        let found = store.products().find(created.id).await.expect("find");

        assert_eq!(found, created);
        assert_eq!(found.name, input.name);
        assert_eq!(found.description, input.description);
        assert_eq!(found.category.id, input.category);
        assert_eq!(found.stock, input.stock);
        assert_eq!(found.price, input.price);
        assert_eq!(found.image, input.image);
    }

    #[tokio::test]
    async fn unknown_category_fails_and_leaves_the_store_unchanged() {
        let (store, _) = store_with_category().await;
        let before = store.products().count().await;
        let result = store.products().create(draft(CategoryId::generate())).await;
        assert!(matches!(result, Err(StoreError::InvalidReference(_))));
        assert_eq!(store.products().count().await, before);
    }

    #[tokio::test]
    async fn update_is_a_full_replace_including_the_image() {
        let (store, category) = store_with_category().await;
        let created = store.products().create(draft(category)).await.expect("create");

        let replacement = ProductDraft {
            name: "Kettle Pro".to_owned(),
            description: String::new(),
            category,
            stock: 0,
            price: Price::ZERO,
            image: None,
        };
        let updated = store
            .products()
            .update(created.id, replacement)
            .await
            .expect("update");
        assert_eq!(updated.name, "Kettle Pro");
        assert_eq!(updated.image, None);

        let found = store.products().find(created.id).await.expect("find");
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn deleting_a_missing_id_fails_and_leaves_the_store_unchanged() {
        let (store, category) = store_with_category().await;
        store.products().create(draft(category)).await.expect("create");
        let before = store.products().count().await;

        let result = store.products().delete(ProductId::generate()).await;
        assert!(matches!(result, Err(StoreError::NotFound("Product"))));
        assert_eq!(store.products().count().await, before);
    }

    #[tokio::test]
    async fn repeated_create_with_identical_fields_yields_two_records() {
        // The store does not deduplicate submissions; callers must guard
        // against double-submits themselves.
        let (store, category) = store_with_category().await;
        let first = store.products().create(draft(category)).await.expect("first");
        let second = store.products().create(draft(category)).await.expect("second");
        assert_ne!(first.id, second.id);
        assert_eq!(store.products().count().await, 2);
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let (store, category) = store_with_category().await;
        let mut names = Vec::new();
        for i in 0..3 {
            let mut d = draft(category);
            d.name = format!("Item {i}");
            names.push(d.name.clone());
            store.products().create(d).await.expect("create");
        }
        let all = store.products().find_all().await.expect("find_all");
        let listed: Vec<_> = all.iter().map(|p| p.name.clone()).collect();
        assert_eq!(listed, names);
    }
}
