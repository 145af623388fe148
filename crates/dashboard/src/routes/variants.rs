//! Variants page route handlers.
//!
//! Handlers only read the latest published snapshot and enqueue user
//! intents - they never wait on the network, so the page stays
//! responsive while a fetch is outstanding.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::page::{ChannelOption, StockView, VariantRowView, ViewState};
use crate::state::AppState;

/// Variants page template.
#[derive(Template, WebTemplate)]
#[template(path = "variants.html")]
pub struct VariantsTemplate {
    pub channels_loaded: bool,
    pub channel_options: Vec<ChannelOption>,
    pub selected_channel: String,
    pub loading: bool,
    pub error: String,
    pub rows: Vec<VariantRowView>,
}

impl From<ViewState> for VariantsTemplate {
    fn from(view: ViewState) -> Self {
        let (loading, error, rows) = match view.stock {
            StockView::Loading => (true, String::new(), Vec::new()),
            StockView::Failed(message) => (false, message, Vec::new()),
            StockView::Ready(rows) => (false, String::new(), rows),
        };

        Self {
            channels_loaded: view.channels_loaded,
            channel_options: view.channel_options,
            selected_channel: view.selected_channel,
            loading,
            error,
            rows,
        }
    }
}

/// Channel selection form.
#[derive(Debug, Deserialize)]
pub struct SelectChannelForm {
    pub channel: String,
}

/// Edit intent form. The ids come from the rendered row and can be
/// empty when the source record had none.
#[derive(Debug, Deserialize)]
pub struct EditVariantForm {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub variant_id: String,
}

/// Display the out-of-stock variants for the selected channel.
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    VariantsTemplate::from(state.page().view())
}

/// Select a channel and re-query.
pub async fn select_channel(
    State(state): State<AppState>,
    Form(form): Form<SelectChannelForm>,
) -> Result<Redirect> {
    if form.channel.is_empty() {
        return Err(AppError::BadRequest("channel must not be empty".to_string()));
    }

    state.page().select_channel(form.channel)?;
    Ok(Redirect::to("/app/variants"))
}

/// Ask the host dashboard to open the variant editor.
pub async fn edit_variant(
    State(state): State<AppState>,
    Form(form): Form<EditVariantForm>,
) -> Result<Redirect> {
    state.page().edit_variant(form.product_id, form.variant_id)?;
    Ok(Redirect::to("/app/variants"))
}
