//! Pagination over the filtered product collection.

use crate::catalog::Product;
use crate::filter::{CompiledFilter, FilterCriteria, FilterError};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One visible slice of the filtered catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    /// Products on the current page, in collection order.
    pub items: Vec<&'a Product>,
    /// Effective page number, clamped into `[1, total_pages]`.
    pub page: usize,
    /// Always at least 1, even for an empty filtered set.
    pub total_pages: usize,
    /// Number of products that survived filtering.
    pub total_items: usize,
}

/// Derive the visible page from the full collection.
///
/// The requested page is clamped into `[1, total_pages]`, so a deletion or
/// re-filter that shrinks the result set below the current page lands on the
/// last valid page instead of an empty one. An empty filtered set yields one
/// empty page.
#[must_use]
pub fn visible_page<'a>(
    products: &'a [Product],
    filter: &CompiledFilter,
    requested_page: usize,
    page_size: usize,
) -> CatalogPage<'a> {
    let page_size = page_size.max(1);
    let filtered = filter.filter(products);
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, total_pages);
    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    CatalogPage {
        items,
        page,
        total_pages,
        total_items,
    }
}

/// Browsing state over the catalog: active criteria plus the requested page.
///
/// The criteria are replaced wholesale on [`apply`](Self::apply), which also
/// resets the page to 1. Deriving a page never mutates the browser; clamping
/// happens at derivation time.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    filter: CompiledFilter,
    page: usize,
    page_size: usize,
}

impl CatalogBrowser {
    /// Create a browser showing the first page with no filtering.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: CompiledFilter::match_all(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the criteria wholesale and reset to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] if the name pattern does not
    /// compile; the previous criteria stay active in that case.
    pub fn apply(&mut self, criteria: FilterCriteria) -> Result<(), FilterError> {
        self.filter = criteria.compile()?;
        self.page = 1;
        Ok(())
    }

    /// Request a page. Values below 1 are treated as 1; values past the end
    /// clamp at derivation time.
    pub fn goto(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// The requested (pre-clamp) page number.
    #[must_use]
    pub const fn requested_page(&self) -> usize {
        self.page
    }

    /// Derive the visible slice of the given collection.
    #[must_use]
    pub fn page<'a>(&self, products: &'a [Product]) -> CatalogPage<'a> {
        visible_page(products, &self.filter, self.page, self.page_size)
    }
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
