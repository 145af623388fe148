//! The variants page coordinator.
//!
//! All page state - the channel list, the selected channel, the stock
//! query result - is owned by a single event-loop task. The rendering
//! surface and the fetch tasks communicate with it exclusively through
//! events, so state changes are sequential and need no locking. The
//! latest renderable snapshot is published through a `watch` channel
//! that the HTTP handlers read without ever blocking on the network.
//!
//! Page lifecycle: `AwaitingChannels -> ChannelsLoaded (auto-selecting)
//! -> AwaitingStockData -> StockDataReady`, looping back to
//! `AwaitingStockData` on every channel change. There is no terminal
//! state; the loop runs until the runtime shuts down.

mod source;
pub mod view;

pub use source::CatalogSource;
pub use view::{ChannelOption, StockView, VariantRowView, ViewState};

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use stockwatch_core::{Channel, ChannelSelection, ProductStock, Row, flatten_rows};

use crate::bridge::AppBridge;
use crate::saleor::SaleorError;

/// Fixed page size of the stock query. No further pagination is done.
pub const STOCK_PAGE_SIZE: i64 = 100;

/// The page loop has stopped and can no longer accept intents.
#[derive(Debug, Error)]
#[error("variants page is gone")]
pub struct PageClosed;

/// Events processed by the page loop, one at a time.
#[derive(Debug)]
enum PageEvent {
    /// The channel list fetch completed.
    ChannelsLoaded(Result<Vec<Channel>, SaleorError>),
    /// The operator picked a channel.
    ChannelSelected(String),
    /// A stock query completed. Keyed by the epoch and channel it was
    /// issued for so superseded responses can be discarded on arrival.
    StockLoaded {
        epoch: u64,
        channel: String,
        result: Result<Vec<ProductStock>, SaleorError>,
    },
    /// The operator asked to edit a variant.
    EditVariant {
        product_id: String,
        variant_id: String,
    },
}

/// State of the gated stock query.
#[derive(Debug)]
enum StockQueryState {
    /// Nothing to show yet: gated on the selection, or a request is in
    /// flight. Also the state reported indefinitely while no channel is
    /// known - never `Failed`.
    Pending,
    /// Rows flattened from the latest successful response.
    Ready(Vec<Row>),
    /// The latest request failed.
    Failed(String),
}

/// Cloneable handle the rendering surface uses to talk to the page loop.
#[derive(Clone)]
pub struct PageHandle {
    events: mpsc::UnboundedSender<PageEvent>,
    view: watch::Receiver<ViewState>,
}

impl PageHandle {
    /// Snapshot of the latest view state.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Subscribe to view updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// User intent: select a channel.
    ///
    /// # Errors
    ///
    /// Returns [`PageClosed`] if the page loop has stopped.
    pub fn select_channel(&self, slug: impl Into<String>) -> Result<(), PageClosed> {
        self.events
            .send(PageEvent::ChannelSelected(slug.into()))
            .map_err(|_| PageClosed)
    }

    /// User intent: open the variant editor for a row.
    ///
    /// # Errors
    ///
    /// Returns [`PageClosed`] if the page loop has stopped.
    pub fn edit_variant(
        &self,
        product_id: impl Into<String>,
        variant_id: impl Into<String>,
    ) -> Result<(), PageClosed> {
        self.events
            .send(PageEvent::EditVariant {
                product_id: product_id.into(),
                variant_id: variant_id.into(),
            })
            .map_err(|_| PageClosed)
    }
}

/// The out-of-stock variants page.
///
/// Owns every piece of mutable page state. Spawned once per app
/// instance; see [`spawn`](Self::spawn).
pub struct VariantsPage<S> {
    source: S,
    bridge: AppBridge,
    events: mpsc::UnboundedSender<PageEvent>,
    view: watch::Sender<ViewState>,
    selection: ChannelSelection,
    channels: Vec<Channel>,
    channels_loaded: bool,
    stock: StockQueryState,
    epoch: u64,
    inflight: Option<InflightKey>,
}

/// Identity of the latest issued stock request.
#[derive(Debug, PartialEq, Eq)]
struct InflightKey {
    epoch: u64,
    channel: String,
}

impl<S: CatalogSource> VariantsPage<S> {
    /// Spawn the page loop and kick off the channel fetch.
    ///
    /// The loop lives until the runtime shuts down; the page has no
    /// terminal state.
    pub fn spawn(source: S, bridge: AppBridge) -> PageHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ViewState::default());

        let page = Self {
            source,
            bridge,
            events: events_tx.clone(),
            view: view_tx,
            selection: ChannelSelection::new(),
            channels: Vec::new(),
            channels_loaded: false,
            stock: StockQueryState::Pending,
            epoch: 0,
            inflight: None,
        };
        tokio::spawn(page.run(events_rx));

        PageHandle {
            events: events_tx,
            view: view_rx,
        }
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<PageEvent>) {
        self.fetch_channels();

        while let Some(event) = events.recv().await {
            self.handle(event);
            self.publish();
        }
    }

    fn fetch_channels(&self) {
        let source = self.source.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.list_channels().await;
            let _ = events.send(PageEvent::ChannelsLoaded(result));
        });
    }

    fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::ChannelsLoaded(Ok(channels)) => {
                self.channels = channels;
                self.channels_loaded = true;
                if self.selection.on_channels_loaded(&self.channels) {
                    tracing::info!(
                        channel = self.selection.selected(),
                        "auto-selected first channel"
                    );
                }
                self.issue_stock_query();
            }
            PageEvent::ChannelsLoaded(Err(error)) => {
                // Selection stays unset and the stock query stays gated;
                // the page keeps rendering its loading state.
                tracing::error!(%error, "channel list fetch failed");
            }
            PageEvent::ChannelSelected(slug) => {
                self.selection.select(slug);
                self.issue_stock_query();
            }
            PageEvent::StockLoaded {
                epoch,
                channel,
                result,
            } => self.apply_stock_result(epoch, &channel, result),
            PageEvent::EditVariant {
                product_id,
                variant_id,
            } => {
                view::navigate_to_variant(&self.bridge, &product_id, &variant_id);
            }
        }
    }

    /// Central gate for the dependent query: while the selection is
    /// unset, no request leaves this function and the state stays
    /// `Pending`.
    fn issue_stock_query(&mut self) {
        let Some(channel) = self.selection.selected() else {
            return;
        };
        let channel = channel.to_string();

        self.epoch += 1;
        self.stock = StockQueryState::Pending;
        self.inflight = Some(InflightKey {
            epoch: self.epoch,
            channel: channel.clone(),
        });

        let source = self.source.clone();
        let events = self.events.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            let result = source.out_of_stock_variants(&channel, STOCK_PAGE_SIZE).await;
            let _ = events.send(PageEvent::StockLoaded {
                epoch,
                channel,
                result,
            });
        });
    }

    fn apply_stock_result(
        &mut self,
        epoch: u64,
        channel: &str,
        result: Result<Vec<ProductStock>, SaleorError>,
    ) {
        let current = self
            .inflight
            .as_ref()
            .is_some_and(|key| key.epoch == epoch && key.channel == channel);
        if !current {
            tracing::debug!(%channel, epoch, "discarding superseded stock response");
            return;
        }
        self.inflight = None;

        self.stock = match result {
            Ok(entries) => StockQueryState::Ready(flatten_rows(&entries)),
            Err(error) => {
                tracing::error!(%error, %channel, "stock query failed");
                StockQueryState::Failed(error.to_string())
            }
        };
    }

    fn publish(&self) {
        let stock = match &self.stock {
            StockQueryState::Pending => StockView::Loading,
            StockQueryState::Failed(message) => StockView::Failed(message.clone()),
            StockQueryState::Ready(rows) => {
                StockView::Ready(rows.iter().map(VariantRowView::from_row).collect())
            }
        };

        self.view.send_replace(ViewState {
            channels_loaded: self.channels_loaded,
            channel_options: self
                .channels
                .iter()
                .map(|channel| ChannelOption {
                    value: channel.slug.clone(),
                    label: channel.name.clone(),
                })
                .collect(),
            selected_channel: self.selection.selected().unwrap_or_default().to_string(),
            stock,
        });
    }
}
