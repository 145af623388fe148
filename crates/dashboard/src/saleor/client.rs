//! Saleor GraphQL client implementation.

use std::future::Future;
use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use secrecy::ExposeSecret;
use tracing::instrument;

use stockwatch_core::{Channel, ProductStock};

use crate::config::SaleorConfig;
use crate::page::CatalogSource;

use super::conversions::{convert_channels, convert_product_stock};
use super::queries::{ChannelsList, ProductStockQuery, channels_list, product_stock_query};
use super::{GraphQLError, GraphQLErrorLocation, SaleorError};

/// Client for the Saleor GraphQL API.
///
/// Provides the two read operations the variants page needs: the channel
/// list and the out-of-stock variants query.
#[derive(Clone)]
pub struct SaleorClient {
    inner: Arc<SaleorClientInner>,
}

struct SaleorClientInner {
    client: reqwest::Client,
    endpoint: String,
    app_token: String,
}

impl SaleorClient {
    /// Create a new Saleor API client.
    #[must_use]
    pub fn new(config: &SaleorConfig) -> Self {
        Self {
            inner: Arc::new(SaleorClientInner {
                client: reqwest::Client::new(),
                endpoint: config.api_url.as_str().to_string(),
                app_token: config.app_token.expose_secret().to_string(),
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, SaleorError>
    where
        Q::Variables: serde::Serialize,
    {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .bearer_auth(&self.inner.app_token)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SaleorError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Saleor API returned non-success status"
            );
            return Err(SaleorError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Saleor GraphQL response"
                );
                return Err(SaleorError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(SaleorError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Saleor GraphQL response has no data and no errors"
            );
            SaleorError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    /// List the sales channels visible to the app.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_channels(&self) -> Result<Vec<Channel>, SaleorError> {
        let data = self.execute::<ChannelsList>(channels_list::Variables).await?;
        Ok(convert_channels(data))
    }

    /// Fetch the first page of out-of-stock variants for a channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(channel = %channel))]
    pub async fn out_of_stock_variants(
        &self,
        channel: &str,
        first: i64,
    ) -> Result<Vec<ProductStock>, SaleorError> {
        let variables = product_stock_query::Variables {
            first,
            channel: channel.to_string(),
        };

        let data = self.execute::<ProductStockQuery>(variables).await?;
        Ok(convert_product_stock(data))
    }
}

impl CatalogSource for SaleorClient {
    fn list_channels(&self) -> impl Future<Output = Result<Vec<Channel>, SaleorError>> + Send {
        Self::list_channels(self)
    }

    fn out_of_stock_variants(
        &self,
        channel: &str,
        first: i64,
    ) -> impl Future<Output = Result<Vec<ProductStock>, SaleorError>> + Send {
        Self::out_of_stock_variants(self, channel, first)
    }
}
