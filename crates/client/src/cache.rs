//! Client-held mirror of the catalog.

use market_core::{
    CatalogBrowser, CatalogPage, Category, CategoryDraft, CategoryId, Product, ProductDraft,
    ProductId, ProductView,
};

use crate::api::{ApiClient, ClientError};

/// Load status of one mirrored collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Client-side mirror of the product and category collections.
///
/// Never the source of truth: every mutation round-trips through the
/// gateway first, and the mirror changes only from the server's returned
/// representation (append on create, replace-by-id on update, filter-out on
/// delete). On failure the mirror is left untouched and the error is
/// recorded on the cache rather than thrown at the view layer.
///
/// Repeated `add` calls are not deduplicated — the store will create a
/// second record — so a view must disable its submit action while a call is
/// in flight.
#[derive(Debug, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
    categories: Vec<Category>,
    products_state: LoadState,
    categories_state: LoadState,
    last_error: Option<String>,
}

impl CatalogCache {
    /// Create an empty cache with both collections idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The mirrored products, unfiltered, category collapsed to its id.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The mirrored categories, unfiltered.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Load status of the product collection.
    #[must_use]
    pub const fn products_state(&self) -> &LoadState {
        &self.products_state
    }

    /// Load status of the category collection.
    #[must_use]
    pub const fn categories_state(&self) -> &LoadState {
        &self.categories_state
    }

    /// Message of the most recent failed operation, cleared by the next
    /// success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Derive the visible slice of the mirrored products.
    #[must_use]
    pub fn visible_page(&self, browser: &CatalogBrowser) -> CatalogPage<'_> {
        browser.page(&self.products)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetch-all products; the collection flag moves
    /// `Loading → Loaded | Failed`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; the previous mirror contents
    /// are kept on failure.
    pub async fn load_products(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.products_state = LoadState::Loading;
        match api.products().await {
            Ok(views) => {
                self.products = views.into_iter().map(ProductView::into_product).collect();
                self.products_state = LoadState::Loaded;
                self.settle()
            }
            Err(err) => {
                self.products_state = LoadState::Failed(err.to_string());
                self.fail(err)
            }
        }
    }

    /// Fetch-all categories; same state transitions as products.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; the previous mirror contents
    /// are kept on failure.
    pub async fn load_categories(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.categories_state = LoadState::Loading;
        match api.categories().await {
            Ok(categories) => {
                self.categories = categories;
                self.categories_state = LoadState::Loaded;
                self.settle()
            }
            Err(err) => {
                self.categories_state = LoadState::Failed(err.to_string());
                self.fail(err)
            }
        }
    }

    /// Load both collections.
    ///
    /// # Errors
    ///
    /// Stops at the first failing collection.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.load_categories(api).await?;
        self.load_products(api).await
    }

    // =========================================================================
    // Product mutations
    // =========================================================================

    /// Create a product and append the confirmed record to the mirror.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; the mirror is unchanged on
    /// failure.
    pub async fn add_product(
        &mut self,
        api: &ApiClient,
        draft: ProductDraft,
    ) -> Result<ProductId, ClientError> {
        match api.create_product(&draft).await {
            Ok(view) => {
                let product = view.into_product();
                let id = product.id;
                self.products.push(product);
                self.settle().map(|()| id)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Replace a product and swap the confirmed record into the mirror.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; the mirror is unchanged on
    /// failure.
    pub async fn edit_product(
        &mut self,
        api: &ApiClient,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<(), ClientError> {
        match api.update_product(id, &draft).await {
            Ok(view) => {
                let product = view.into_product();
                if let Some(slot) = self.products.iter_mut().find(|p| p.id == id) {
                    *slot = product;
                }
                self.settle()
            }
            Err(err) => self.fail(err),
        }
    }

    /// Delete a product, dropping it from the mirror after confirmation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; the mirror is unchanged on
    /// failure.
    pub async fn remove_product(
        &mut self,
        api: &ApiClient,
        id: ProductId,
    ) -> Result<(), ClientError> {
        match api.delete_product(id).await {
            Ok(()) => {
                self.products.retain(|p| p.id != id);
                self.settle()
            }
            Err(err) => self.fail(err),
        }
    }

    // =========================================================================
    // Category mutations
    // =========================================================================

    /// Create a category and append the confirmed record to the mirror.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; the mirror is unchanged on
    /// failure.
    pub async fn add_category(
        &mut self,
        api: &ApiClient,
        draft: CategoryDraft,
    ) -> Result<CategoryId, ClientError> {
        match api.create_category(&draft).await {
            Ok(category) => {
                let id = category.id;
                self.categories.push(category);
                self.settle().map(|()| id)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Replace a category and swap the confirmed record into the mirror.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; the mirror is unchanged on
    /// failure.
    pub async fn edit_category(
        &mut self,
        api: &ApiClient,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<(), ClientError> {
        match api.update_category(id, &draft).await {
            Ok(category) => {
                if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
                    *slot = category;
                }
                self.settle()
            }
            Err(err) => self.fail(err),
        }
    }

    /// Delete a category, dropping it from the mirror after confirmation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ClientError`]; a category still referenced
    /// by products is rejected by the gateway and stays in the mirror.
    pub async fn remove_category(
        &mut self,
        api: &ApiClient,
        id: CategoryId,
    ) -> Result<(), ClientError> {
        match api.delete_category(id).await {
            Ok(()) => {
                self.categories.retain(|c| c.id != id);
                self.settle()
            }
            Err(err) => self.fail(err),
        }
    }

    fn settle(&mut self) -> Result<(), ClientError> {
        self.last_error = None;
        Ok(())
    }

    fn fail<T>(&mut self, err: ClientError) -> Result<T, ClientError> {
        self.last_error = Some(err.to_string());
        Err(err)
    }
}
