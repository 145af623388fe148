//! View state published to the rendering surface, and the variant row
//! presenter.

use stockwatch_core::Row;

use crate::bridge::{AppBridge, AppBridgeAction};

/// One option of the channel combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOption {
    /// The channel slug, submitted back as the selection value.
    pub value: String,
    /// The channel's display name.
    pub label: String,
}

/// The stock table portion of the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StockView {
    /// No data yet: channels still loading, selection unset, or the query
    /// in flight. Rendered as a spinner.
    #[default]
    Loading,
    /// The stock query failed. Rendered as an error panel, distinct from
    /// the spinner.
    Failed(String),
    /// Rows ready to render.
    Ready(Vec<VariantRowView>),
}

/// Everything the rendering surface needs for one paint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Whether the channel list has arrived (an empty combobox is then
    /// empty data, not a pending fetch).
    pub channels_loaded: bool,
    pub channel_options: Vec<ChannelOption>,
    /// Selected channel slug; empty while unset.
    pub selected_channel: String,
    pub stock: StockView,
}

/// Presentation of one (product, variant) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRowView {
    /// Product id, empty string when the source record had none.
    pub product_id: String,
    /// Variant id, empty string when the source record had none.
    pub variant_id: String,
    pub image_url: Option<String>,
    pub product_name: String,
    pub variant_name: String,
    pub sku: String,
    /// One line per warehouse, `"{name}: {quantity}"`, source order.
    pub stock_lines: Vec<String>,
}

impl VariantRowView {
    /// Present one row for rendering.
    #[must_use]
    pub fn from_row(row: &Row) -> Self {
        Self {
            product_id: row
                .product
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            variant_id: row
                .variant
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            image_url: row
                .variant
                .display_image_url(&row.product)
                .map(str::to_string),
            product_name: row.product.name.clone(),
            variant_name: row.variant.name.clone(),
            sku: row.variant.sku.clone().unwrap_or_default(),
            stock_lines: row
                .variant
                .stocks
                .iter()
                .map(|stock| format!("{}: {}", stock.warehouse_name, stock.quantity))
                .collect(),
        }
    }
}

/// The dashboard path of a variant's edit screen.
///
/// Missing ids arrive here as empty strings and stay in the path as
/// empty segments - the target is still constructed, never skipped.
#[must_use]
pub fn variant_editor_path(product_id: &str, variant_id: &str) -> String {
    format!("/products/{product_id}/variant/{variant_id}")
}

/// Ask the hosting frame to open a variant's edit screen in a fresh
/// navigation context. Fire-and-forget.
pub fn navigate_to_variant(bridge: &AppBridge, product_id: &str, variant_id: &str) {
    bridge.dispatch(AppBridgeAction::redirect(
        variant_editor_path(product_id, variant_id),
        true,
    ));
}
