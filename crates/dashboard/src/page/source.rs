//! The data-source seam between the page loop and the GraphQL client.

use std::future::Future;

use stockwatch_core::{Channel, ProductStock};

use crate::saleor::SaleorError;

/// Read-only catalog operations the variants page depends on.
///
/// Implemented by [`SaleorClient`](crate::saleor::SaleorClient) in
/// production and by in-process fakes in tests, so the page loop can be
/// driven without HTTP.
pub trait CatalogSource: Clone + Send + Sync + 'static {
    /// List the sales channels available to the app.
    fn list_channels(&self) -> impl Future<Output = Result<Vec<Channel>, SaleorError>> + Send;

    /// Fetch the first page of out-of-stock variants for a channel.
    fn out_of_stock_variants(
        &self,
        channel: &str,
        first: i64,
    ) -> impl Future<Output = Result<Vec<ProductStock>, SaleorError>> + Send;
}
