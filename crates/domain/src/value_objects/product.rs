//! Transport products offered by a provider

use serde::{Deserialize, Serialize};

/// A product category a provider can filter by (e.g. regional rail, bus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Product identifier as used in queries (e.g. `"regional"`)
    pub id: String,
    /// Display label
    pub label: String,
    /// Whether the provider recommends enabling this product by default
    pub default_enabled: bool,
}

impl ProductInfo {
    /// Create a product entry
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, default_enabled: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default_enabled,
        }
    }
}

/// The ordered set of products a provider supports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: Vec<ProductInfo>,
}

impl ProductCatalog {
    /// Create a catalog from an ordered product list
    #[must_use]
    pub const fn new(products: Vec<ProductInfo>) -> Self {
        Self { products }
    }

    /// All products, in provider order
    #[must_use]
    pub fn products(&self) -> &[ProductInfo] {
        &self.products
    }

    /// Identifiers of all products
    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.id.as_str())
    }

    /// Identifiers of the recommended default subset
    #[must_use]
    pub fn defaults(&self) -> Vec<String> {
        self.products
            .iter()
            .filter(|p| p.default_enabled)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Whether the catalog knows the given product id
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Build the query filter for a user selection
    ///
    /// Every catalog product appears exactly once; selected ids that the
    /// catalog does not know are ignored.
    #[must_use]
    pub fn filter(&self, enabled: &[String]) -> ProductFilter {
        ProductFilter(
            self.products
                .iter()
                .map(|p| (p.id.clone(), enabled.iter().any(|e| *e == p.id)))
                .collect(),
        )
    }
}

/// Per-product enabled flags for a single query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter(Vec<(String, bool)>);

impl ProductFilter {
    /// Iterate `(product id, enabled)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, on)| (id.as_str(), *on))
    }

    /// Whether a product is enabled
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.0.iter().any(|(p, on)| p == id && *on)
    }

    /// Number of products in the filter
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the filter covers no products at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
