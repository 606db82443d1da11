//! Filter criteria over the product collection.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::CategoryId;

/// Errors that can occur when compiling [`FilterCriteria`].
#[derive(Debug, Error)]
pub enum FilterError {
    /// The name pattern is not a valid regular expression.
    #[error("invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Transient predicate set applied to the full product collection.
///
/// Replaced wholesale on each apply; an empty pattern, unset stock flag, and
/// empty category match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterCriteria {
    /// Case-insensitive regex/substring matched against product names.
    #[serde(default)]
    pub name_pattern: String,
    /// Keep only products with stock above zero.
    #[serde(default)]
    pub in_stock_only: bool,
    /// Keep only products whose category equals this one exactly.
    #[serde(default)]
    pub category: Option<CategoryId>,
}

impl FilterCriteria {
    /// Compile the name pattern for repeated matching.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] if the pattern is not a valid
    /// regular expression.
    pub fn compile(&self) -> Result<CompiledFilter, FilterError> {
        let name = if self.name_pattern.is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&self.name_pattern)
                    .case_insensitive(true)
                    .build()?,
            )
        };
        Ok(CompiledFilter {
            name,
            in_stock_only: self.in_stock_only,
            category: self.category,
        })
    }
}

/// [`FilterCriteria`] with the name pattern compiled, ready to test products.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilter {
    name: Option<Regex>,
    in_stock_only: bool,
    category: Option<CategoryId>,
}

impl CompiledFilter {
    /// A filter that keeps every product.
    #[must_use]
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Test a single product against the criteria.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(re) = &self.name
            && !re.is_match(&product.name)
        {
            return false;
        }
        if self.in_stock_only && product.stock == 0 {
            return false;
        }
        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }
        true
    }

    /// Keep the products matching the criteria, preserving order.
    #[must_use]
    pub fn filter<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}
