//! Conversions from GraphQL response data to core types.

use stockwatch_core::{
    Channel, ChannelId, MediaItem, Product, ProductId, ProductStock, ProductVariant, StockEntry,
    VariantId, WarehouseId,
};

use super::queries::{channels_list, product_stock_query};

pub(super) fn convert_channels(data: channels_list::ResponseData) -> Vec<Channel> {
    data.channels
        .unwrap_or_default()
        .into_iter()
        .map(|channel| Channel {
            id: ChannelId::new(channel.id),
            slug: channel.slug,
            name: channel.name,
        })
        .collect()
}

pub(super) fn convert_product_stock(data: product_stock_query::ResponseData) -> Vec<ProductStock> {
    data.products
        .map(|products| products.edges.into_iter().map(convert_edge).collect())
        .unwrap_or_default()
}

fn convert_edge(edge: product_stock_query::ProductStockQueryProductsEdges) -> ProductStock {
    let node = edge.node;

    ProductStock {
        product: Product {
            id: Some(ProductId::new(node.id)),
            name: node.name,
            thumbnail_url: node.thumbnail.map(|thumbnail| thumbnail.url),
        },
        variants: node
            .variants
            .unwrap_or_default()
            .into_iter()
            .map(convert_variant)
            .collect(),
    }
}

fn convert_variant(
    variant: product_stock_query::ProductStockQueryProductsEdgesNodeVariants,
) -> ProductVariant {
    ProductVariant {
        id: Some(VariantId::new(variant.id)),
        name: variant.name,
        sku: variant.sku,
        media: variant
            .media
            .unwrap_or_default()
            .into_iter()
            .map(|media| MediaItem { url: media.url })
            .collect(),
        // Stock order is the source's order; the presenter renders it as-is.
        stocks: variant
            .stocks
            .unwrap_or_default()
            .into_iter()
            .map(|stock| StockEntry {
                warehouse_id: WarehouseId::new(stock.warehouse.id),
                warehouse_name: stock.warehouse.name,
                quantity: stock.quantity,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_channels() {
        let data: channels_list::ResponseData = serde_json::from_value(serde_json::json!({
            "channels": [
                { "id": "Q2hhbm5lbDox", "slug": "default-channel", "name": "Default" },
                { "id": "Q2hhbm5lbDoy", "slug": "eu", "name": "EU" }
            ]
        }))
        .expect("decode channels");

        let channels = convert_channels(data);
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].slug, "default-channel");
        assert_eq!(channels[1].name, "EU");
    }

    #[test]
    fn test_convert_channels_null_list() {
        let data: channels_list::ResponseData =
            serde_json::from_value(serde_json::json!({ "channels": null }))
                .expect("decode channels");
        assert!(convert_channels(data).is_empty());
    }

    #[test]
    fn test_convert_product_stock_preserves_warehouse_order() {
        let data: product_stock_query::ResponseData = serde_json::from_value(serde_json::json!({
            "products": {
                "edges": [
                    {
                        "node": {
                            "id": "P1",
                            "name": "Shirt",
                            "thumbnail": { "url": "https://cdn/shirt.png" },
                            "variants": [
                                {
                                    "id": "V1",
                                    "name": "Red",
                                    "sku": "SH-R",
                                    "media": [ { "url": "https://cdn/red.png" } ],
                                    "stocks": [
                                        { "quantity": 0, "warehouse": { "id": "W2", "name": "Overflow" } },
                                        { "quantity": 3, "warehouse": { "id": "W1", "name": "Main" } }
                                    ]
                                }
                            ]
                        }
                    }
                ]
            }
        }))
        .expect("decode stock");

        let entries = convert_product_stock(data);
        assert_eq!(entries.len(), 1);

        let variant = &entries[0].variants[0];
        assert_eq!(variant.media[0].url, "https://cdn/red.png");
        // W2 came first from the source and must stay first.
        assert_eq!(variant.stocks[0].warehouse_name, "Overflow");
        assert_eq!(variant.stocks[1].warehouse_name, "Main");
    }

    #[test]
    fn test_convert_product_without_variants() {
        let data: product_stock_query::ResponseData = serde_json::from_value(serde_json::json!({
            "products": {
                "edges": [
                    { "node": { "id": "P1", "name": "Shirt" } }
                ]
            }
        }))
        .expect("decode stock");

        let entries = convert_product_stock(data);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].variants.is_empty());
        assert!(entries[0].product.thumbnail_url.is_none());
    }
}
