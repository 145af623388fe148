//! Flat (product, variant) rows derived from the nested query result.

use serde::{Deserialize, Serialize};

use super::catalog::{Product, ProductStock, ProductVariant};

/// One row of the variants table: a product paired with one of its
/// variants. Derived, never persisted; recomputed from every successful
/// query response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub product: Product,
    pub variant: ProductVariant,
}

/// Flatten the nested product/variant collection into ordered rows.
///
/// Products keep their source order; within a product, variants keep
/// theirs. A product with no variants contributes zero rows. Pure
/// function: same input, same output.
#[must_use]
pub fn flatten_rows(entries: &[ProductStock]) -> Vec<Row> {
    entries
        .iter()
        .flat_map(|entry| {
            entry.variants.iter().map(|variant| Row {
                product: entry.product.clone(),
                variant: variant.clone(),
            })
        })
        .collect()
}
