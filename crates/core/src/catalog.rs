//! Catalog records and their wire shapes.
//!
//! [`Product`] and [`Category`] are the records as held by the entity store
//! and the client mirror. The draft types carry the mutable fields of a
//! create/replace request; unknown fields are rejected rather than silently
//! accepted. [`ProductView`] is the read shape with the category reference
//! populated to the full object.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Price, ProductId};

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Must resolve to an existing category at write time.
    pub category: CategoryId,
    pub stock: u32,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A named grouping referenced by products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// The mutable fields of a product, as accepted on create and replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: CategoryId,
    pub stock: u32,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The mutable fields of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDraft {
    pub name: String,
}

/// A product as returned by the REST surface, category populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub stock: u32,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductView {
    /// Collapse the populated category back to its identifier.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category.id,
            stock: self.stock,
            price: self.price,
            image: self.image,
        }
    }
}
