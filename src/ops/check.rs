//! Product health report.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::product::{Product, ProductKind};
use crate::ops::locate::Locator;

/// Result of locating a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductStatus {
    /// Manifest variable name
    pub variable: String,

    /// Product kind
    pub kind: ProductKind,

    /// Human-readable description of what was searched for
    pub description: String,

    /// Resolved path, if satisfied
    pub path: Option<PathBuf>,
}

impl ProductStatus {
    pub fn satisfied(&self) -> bool {
        self.path.is_some()
    }
}

/// Locate every product, preserving input order.
pub fn check_products(products: &[Product], locator: &Locator<'_>) -> Vec<ProductStatus> {
    products
        .iter()
        .map(|product| ProductStatus {
            variable: product.variable_name().to_string(),
            kind: product.kind(),
            description: product.to_string(),
            path: locator.locate(product),
        })
        .collect()
}

/// Whether every status in the report is satisfied.
pub fn all_satisfied(statuses: &[ProductStatus]) -> bool {
    statuses.iter().all(ProductStatus::satisfied)
}
