//! Integration tests for Stockwatch.
//!
//! The variants page loop is exercised end-to-end against
//! [`FakeCatalog`], an in-process [`CatalogSource`] with scripted
//! responses:
//!
//! - per-channel stock data and failure injection
//! - per-channel completion gates, to pin down response ordering
//! - a log of every issued stock request, for gating assertions
//!
//! No Saleor instance and no HTTP are involved.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use stockwatch_core::{Channel, ChannelId, ProductStock};
use stockwatch_dashboard::page::CatalogSource;
use stockwatch_dashboard::saleor::{GraphQLError, SaleorError};

/// A stock request the fake has seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRequest {
    pub channel: String,
    pub first: i64,
}

/// Scripted in-process stand-in for the Saleor client.
#[derive(Clone, Default)]
pub struct FakeCatalog {
    inner: Arc<FakeCatalogInner>,
}

#[derive(Default)]
struct FakeCatalogInner {
    channels: Mutex<Vec<Channel>>,
    channels_fail: Mutex<bool>,
    stock: Mutex<HashMap<String, Vec<ProductStock>>>,
    stock_fail: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    issued: Mutex<Vec<IssuedRequest>>,
}

impl FakeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the channel list.
    #[must_use]
    pub fn with_channels(self, slugs_and_names: &[(&str, &str)]) -> Self {
        let channels = slugs_and_names
            .iter()
            .enumerate()
            .map(|(i, (slug, name))| Channel {
                id: ChannelId::new(format!("Q2hhbm5lbDo{i}")),
                slug: (*slug).to_string(),
                name: (*name).to_string(),
            })
            .collect();
        *self.inner.channels.lock().expect("channels lock") = channels;
        self
    }

    /// Make the channel list fetch fail.
    #[must_use]
    pub fn with_failing_channels(self) -> Self {
        *self.inner.channels_fail.lock().expect("channels_fail lock") = true;
        self
    }

    /// Script the stock response for one channel.
    pub fn set_stock(&self, channel: &str, entries: Vec<ProductStock>) {
        self.inner
            .stock
            .lock()
            .expect("stock lock")
            .insert(channel.to_string(), entries);
    }

    /// Make the stock query for one channel fail.
    pub fn fail_stock(&self, channel: &str) {
        self.inner
            .stock_fail
            .lock()
            .expect("stock_fail lock")
            .insert(channel.to_string());
    }

    /// Hold stock responses for one channel until the returned gate is
    /// notified.
    pub fn hold_stock(&self, channel: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner
            .gates
            .lock()
            .expect("gates lock")
            .insert(channel.to_string(), Arc::clone(&gate));
        gate
    }

    /// Every stock request issued so far.
    #[must_use]
    pub fn issued(&self) -> Vec<IssuedRequest> {
        self.inner.issued.lock().expect("issued lock").clone()
    }

    fn error(message: &str) -> SaleorError {
        SaleorError::GraphQL(vec![GraphQLError {
            message: message.to_string(),
            locations: vec![],
            path: vec![],
        }])
    }
}

/// Shorthand for a one-variant product entry with a single warehouse.
#[must_use]
pub fn single_variant_entry(
    product_id: &str,
    product_name: &str,
    variant_id: &str,
    variant_name: &str,
    sku: &str,
    warehouse_name: &str,
    quantity: i64,
) -> ProductStock {
    use stockwatch_core::{Product, ProductId, ProductVariant, StockEntry, VariantId, WarehouseId};

    ProductStock {
        product: Product {
            id: Some(ProductId::new(product_id)),
            name: product_name.to_string(),
            thumbnail_url: None,
        },
        variants: vec![ProductVariant {
            id: Some(VariantId::new(variant_id)),
            name: variant_name.to_string(),
            sku: Some(sku.to_string()),
            media: vec![],
            stocks: vec![StockEntry {
                warehouse_id: WarehouseId::new("W1"),
                warehouse_name: warehouse_name.to_string(),
                quantity,
            }],
        }],
    }
}

impl CatalogSource for FakeCatalog {
    fn list_channels(&self) -> impl Future<Output = Result<Vec<Channel>, SaleorError>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            if *inner.channels_fail.lock().expect("channels_fail lock") {
                return Err(Self::error("channel list unavailable"));
            }
            Ok(inner.channels.lock().expect("channels lock").clone())
        }
    }

    fn out_of_stock_variants(
        &self,
        channel: &str,
        first: i64,
    ) -> impl Future<Output = Result<Vec<ProductStock>, SaleorError>> + Send {
        let inner = Arc::clone(&self.inner);
        let channel = channel.to_string();
        async move {
            inner.issued.lock().expect("issued lock").push(IssuedRequest {
                channel: channel.clone(),
                first,
            });

            let gate = inner.gates.lock().expect("gates lock").get(&channel).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            if inner
                .stock_fail
                .lock()
                .expect("stock_fail lock")
                .contains(&channel)
            {
                return Err(Self::error("stock query unavailable"));
            }

            Ok(inner
                .stock
                .lock()
                .expect("stock lock")
                .get(&channel)
                .cloned()
                .unwrap_or_default())
        }
    }
}
