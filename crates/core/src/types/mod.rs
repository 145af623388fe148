//! Core types for Stockwatch.
//!
//! This module provides type-safe wrappers for the domain concepts of
//! the out-of-stock variants page.

pub mod catalog;
pub mod channel;
pub mod id;
pub mod row;

pub use catalog::{MediaItem, Product, ProductStock, ProductVariant, StockEntry};
pub use channel::{Channel, ChannelSelection};
pub use id::*;
pub use row::{Row, flatten_rows};
