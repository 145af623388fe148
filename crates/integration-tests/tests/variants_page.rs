//! End-to-end tests of the variants page flow: channel auto-selection,
//! query gating, channel switching, and stale-response protection.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{sleep, timeout};

use stockwatch_dashboard::bridge::AppBridge;
use stockwatch_dashboard::page::{StockView, VariantsPage, ViewState};
use stockwatch_integration_tests::{FakeCatalog, single_variant_entry};

const WAIT: Duration = Duration::from_secs(5);

/// Wait until the published view satisfies the predicate.
async fn wait_view(
    rx: &mut watch::Receiver<ViewState>,
    predicate: impl FnMut(&ViewState) -> bool,
) -> ViewState {
    timeout(WAIT, rx.wait_for(predicate))
        .await
        .expect("view update timed out")
        .expect("page loop gone")
        .clone()
}

fn spawn_page(
    catalog: &FakeCatalog,
) -> (
    stockwatch_dashboard::page::PageHandle,
    tokio::sync::mpsc::UnboundedReceiver<stockwatch_dashboard::bridge::AppBridgeAction>,
) {
    let (bridge, bridge_rx) = AppBridge::new();
    bridge.handshake();
    let handle = VariantsPage::spawn(catalog.clone(), bridge);
    (handle, bridge_rx)
}

#[tokio::test]
async fn auto_selects_first_channel_and_renders_rows() {
    let catalog =
        FakeCatalog::new().with_channels(&[("default-channel", "Default"), ("eu", "EU")]);
    catalog.set_stock(
        "default-channel",
        vec![single_variant_entry(
            "P1", "Shirt", "V1", "Red", "SH-R", "Main", 0,
        )],
    );

    let (handle, _bridge_rx) = spawn_page(&catalog);
    let mut rx = handle.subscribe();

    let view = wait_view(&mut rx, |view| {
        matches!(&view.stock, StockView::Ready(rows) if !rows.is_empty())
    })
    .await;

    assert_eq!(view.selected_channel, "default-channel");
    assert_eq!(view.channel_options.len(), 2);
    assert_eq!(view.channel_options[0].label, "Default");

    let StockView::Ready(rows) = view.stock else {
        panic!("expected ready rows");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].product_id, "P1");
    assert_eq!(rows[0].variant_id, "V1");
    assert_eq!(rows[0].product_name, "Shirt");
    assert_eq!(rows[0].stock_lines, vec!["Main: 0".to_string()]);
}

#[tokio::test]
async fn empty_channel_list_keeps_query_gated() {
    let catalog = FakeCatalog::new().with_channels(&[]);

    let (handle, _bridge_rx) = spawn_page(&catalog);
    let mut rx = handle.subscribe();

    let view = wait_view(&mut rx, |view| view.channels_loaded).await;

    assert_eq!(view.selected_channel, "");
    assert!(matches!(view.stock, StockView::Loading));
    assert!(catalog.issued().is_empty());
}

#[tokio::test]
async fn channel_fetch_failure_keeps_loading_state() {
    let catalog = FakeCatalog::new().with_failing_channels();

    let (handle, _bridge_rx) = spawn_page(&catalog);

    // The failure is terminal for this page load: selection stays unset
    // and no stock request is ever issued.
    sleep(Duration::from_millis(200)).await;

    let view = handle.view();
    assert!(!view.channels_loaded);
    assert_eq!(view.selected_channel, "");
    assert!(matches!(view.stock, StockView::Loading));
    assert!(catalog.issued().is_empty());
}

#[tokio::test]
async fn stock_failure_is_distinct_from_pending() {
    let catalog = FakeCatalog::new().with_channels(&[("default-channel", "Default")]);
    catalog.fail_stock("default-channel");

    let (handle, _bridge_rx) = spawn_page(&catalog);
    let mut rx = handle.subscribe();

    let view = wait_view(&mut rx, |view| {
        matches!(view.stock, StockView::Failed(_))
    })
    .await;

    let StockView::Failed(message) = view.stock else {
        panic!("expected failed state");
    };
    assert!(message.contains("stock query unavailable"));
}

#[tokio::test]
async fn channel_switch_requeries_and_renders_new_rows() {
    let catalog =
        FakeCatalog::new().with_channels(&[("default-channel", "Default"), ("eu", "EU")]);
    catalog.set_stock(
        "default-channel",
        vec![single_variant_entry(
            "P1", "Shirt", "V1", "Red", "SH-R", "Main", 0,
        )],
    );
    catalog.set_stock(
        "eu",
        vec![single_variant_entry(
            "P2", "Mug", "V2", "Blue", "MG-B", "Berlin", 0,
        )],
    );

    let (handle, _bridge_rx) = spawn_page(&catalog);
    let mut rx = handle.subscribe();

    wait_view(&mut rx, |view| {
        matches!(&view.stock, StockView::Ready(rows) if !rows.is_empty())
    })
    .await;

    handle.select_channel("eu").expect("page alive");

    let view = wait_view(&mut rx, |view| {
        matches!(&view.stock, StockView::Ready(rows) if rows.first().is_some_and(|row| row.product_id == "P2"))
    })
    .await;
    assert_eq!(view.selected_channel, "eu");

    let issued: Vec<_> = catalog
        .issued()
        .into_iter()
        .map(|request| request.channel)
        .collect();
    assert_eq!(issued, vec!["default-channel".to_string(), "eu".to_string()]);
}

#[tokio::test]
async fn every_issued_request_has_a_channel_and_fixed_page_size() {
    let catalog =
        FakeCatalog::new().with_channels(&[("default-channel", "Default"), ("eu", "EU")]);

    let (handle, _bridge_rx) = spawn_page(&catalog);
    let mut rx = handle.subscribe();

    wait_view(&mut rx, |view| {
        matches!(view.stock, StockView::Ready(_))
    })
    .await;

    handle.select_channel("eu").expect("page alive");
    wait_view(&mut rx, |view| view.selected_channel == "eu").await;

    let issued = catalog.issued();
    assert!(!issued.is_empty());
    for request in issued {
        assert!(!request.channel.is_empty());
        assert_eq!(request.first, 100);
    }
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_channel() {
    let catalog =
        FakeCatalog::new().with_channels(&[("default-channel", "Default"), ("eu", "EU")]);
    catalog.set_stock(
        "default-channel",
        vec![single_variant_entry(
            "P1", "Stale", "V1", "Red", "SH-R", "Main", 0,
        )],
    );
    catalog.set_stock(
        "eu",
        vec![single_variant_entry(
            "P2", "Fresh", "V2", "Blue", "MG-B", "Berlin", 0,
        )],
    );

    // Hold the default channel's response so it resolves after the switch.
    let gate = catalog.hold_stock("default-channel");

    let (handle, _bridge_rx) = spawn_page(&catalog);
    let mut rx = handle.subscribe();

    // Wait until the gated request for the auto-selected channel is in
    // flight, then switch away from it.
    timeout(WAIT, async {
        while catalog.issued().is_empty() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("first stock request never issued");

    handle.select_channel("eu").expect("page alive");

    let view = wait_view(&mut rx, |view| {
        matches!(&view.stock, StockView::Ready(rows) if rows.first().is_some_and(|row| row.product_name == "Fresh"))
    })
    .await;
    assert_eq!(view.selected_channel, "eu");

    // Let the superseded response for the old channel arrive late.
    gate.notify_one();
    sleep(Duration::from_millis(200)).await;

    let view = handle.view();
    assert_eq!(view.selected_channel, "eu");
    let StockView::Ready(rows) = view.stock else {
        panic!("expected ready rows");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].product_name, "Fresh");
}
