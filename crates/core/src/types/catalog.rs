//! Catalog entities returned by the stock query.
//!
//! These mirror the data source's nested product/variant/stock shape
//! after decoding - plain data, no pagination metadata.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId, WarehouseId};

/// A product wrapping one or more variants.
///
/// The id can be absent when the source returns a partial record; the
/// navigation path builder keeps an empty segment in that case rather
/// than refusing to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub thumbnail_url: Option<String>,
}

/// A single media entry attached to a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
}

/// Per-warehouse stock for a variant.
///
/// Unique per (variant, warehouse) pair. Order is the source's order and
/// is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub quantity: i64,
}

/// A sellable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Option<VariantId>,
    pub name: String,
    pub sku: Option<String>,
    pub media: Vec<MediaItem>,
    pub stocks: Vec<StockEntry>,
}

impl ProductVariant {
    /// The URL to display for this variant: its first media entry, falling
    /// back to the parent product's thumbnail when the variant has none.
    #[must_use]
    pub fn display_image_url<'a>(&'a self, product: &'a Product) -> Option<&'a str> {
        self.media
            .first()
            .map(|media| media.url.as_str())
            .or(product.thumbnail_url.as_deref())
    }
}

/// One decoded entry of the nested query result: a product together with
/// its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStock {
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}
