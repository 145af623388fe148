//! GraphQL query definitions for the Saleor API.
//!
//! The Saleor schema is not vendored into this repository, so the two
//! operations implement [`GraphQLQuery`] by hand in the same shape
//! `graphql_client` codegen produces: one unit struct per operation with
//! a snake_case module holding `Variables`, `ResponseData`, and the
//! query document.

use graphql_client::{GraphQLQuery, QueryBody};

/// Lists the sales channels available to the app.
pub struct ChannelsList;

pub mod channels_list {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "ChannelsList";
    pub const QUERY: &str = "\
query ChannelsList {
  channels {
    id
    slug
    name
  }
}";

    #[derive(Debug, Serialize)]
    pub struct Variables;

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub channels: Option<Vec<ChannelsListChannels>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ChannelsListChannels {
        pub id: String,
        pub slug: String,
        pub name: String,
    }
}

impl GraphQLQuery for ChannelsList {
    type Variables = channels_list::Variables;
    type ResponseData = channels_list::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: channels_list::QUERY,
            operation_name: channels_list::OPERATION_NAME,
        }
    }
}

/// First page of out-of-stock variants for one channel, with media and
/// per-warehouse stock.
pub struct ProductStockQuery;

pub mod product_stock_query {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "ProductStockQuery";
    pub const QUERY: &str = "\
query ProductStockQuery($first: Int!, $channel: String!) {
  products(
    first: $first
    channel: $channel
    filter: { stockAvailability: OUT_OF_STOCK }
  ) {
    edges {
      node {
        id
        name
        thumbnail {
          url
        }
        variants {
          id
          name
          sku
          media {
            url
          }
          stocks {
            quantity
            warehouse {
              id
              name
            }
          }
        }
      }
    }
  }
}";

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub channel: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Option<ProductStockQueryProducts>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProducts {
        pub edges: Vec<ProductStockQueryProductsEdges>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProductsEdges {
        pub node: ProductStockQueryProductsEdgesNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProductsEdgesNode {
        pub id: String,
        pub name: String,
        pub thumbnail: Option<ProductStockQueryProductsEdgesNodeThumbnail>,
        pub variants: Option<Vec<ProductStockQueryProductsEdgesNodeVariants>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProductsEdgesNodeThumbnail {
        pub url: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProductsEdgesNodeVariants {
        pub id: String,
        pub name: String,
        pub sku: Option<String>,
        pub media: Option<Vec<ProductStockQueryProductsEdgesNodeVariantsMedia>>,
        pub stocks: Option<Vec<ProductStockQueryProductsEdgesNodeVariantsStocks>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProductsEdgesNodeVariantsMedia {
        pub url: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProductsEdgesNodeVariantsStocks {
        pub quantity: i64,
        pub warehouse: ProductStockQueryProductsEdgesNodeVariantsStocksWarehouse,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductStockQueryProductsEdgesNodeVariantsStocksWarehouse {
        pub id: String,
        pub name: String,
    }
}

impl GraphQLQuery for ProductStockQuery {
    type Variables = product_stock_query::Variables;
    type ResponseData = product_stock_query::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: product_stock_query::QUERY,
            operation_name: product_stock_query::OPERATION_NAME,
        }
    }
}
