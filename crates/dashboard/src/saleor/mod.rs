//! Saleor GraphQL API client.
//!
//! # Architecture
//!
//! - Uses the `graphql_client` request/response envelope with `reqwest`
//! - The dashboard only reads: channel listing and the out-of-stock
//!   variants query, nothing else
//! - No local caching: the page recomputes its rows from every
//!   successful response
//!
//! # Example
//!
//! ```rust,ignore
//! use stockwatch_dashboard::saleor::SaleorClient;
//!
//! let client = SaleorClient::new(&config.saleor);
//!
//! let channels = client.list_channels().await?;
//! let stock = client
//!     .out_of_stock_variants(&channels[0].slug, 100)
//!     .await?;
//! ```

mod client;
mod conversions;
pub mod queries;

pub use client::SaleorClient;

use thiserror::Error;

/// Errors that can occur when talking to the Saleor API.
#[derive(Debug, Error)]
pub enum SaleorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Saleor API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if !e.locations.is_empty() {
                let loc = &e.locations[0];
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid channel".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = SaleorError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid channel"
        );
    }

    #[test]
    fn test_graphql_error_empty_messages() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("products".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = SaleorError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: products.0 at line 5:10"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }];
        let err = SaleorError::GraphQL(errors);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = SaleorError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = SaleorError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
