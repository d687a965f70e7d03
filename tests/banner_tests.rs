//! Banner coordinator coverage: idempotent replace/disable semantics and
//! visibility tracking, with no reload-on-close behavior.

use std::sync::Arc;

use ad_mediator::{
    AdFormat, AdService, AdsConfig, BannerCoordinator, BannerLayout, LoadError,
    MockAdNetworkClient, Platform,
};

fn test_client() -> Arc<MockAdNetworkClient> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    MockAdNetworkClient::new()
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn banner(client: &Arc<MockAdNetworkClient>) -> BannerCoordinator {
    BannerCoordinator::new(
        client.clone(),
        "unit-banner".to_string(),
        BannerLayout::default(),
    )
}

#[tokio::test]
async fn enable_loads_a_banner_with_the_configured_layout() {
    let client = test_client();
    let coordinator = banner(&client);
    let controller = client.enqueue_load_success(AdFormat::Banner);

    coordinator.enable();
    settle().await;

    let calls = client.load_calls(AdFormat::Banner);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].placement_id, "unit-banner");
    assert_eq!(calls[0].banner_layout, Some(BannerLayout::default()));
    assert!(!controller.is_destroyed());
}

#[tokio::test]
async fn enable_twice_keeps_exactly_one_live_banner() {
    let client = test_client();
    let coordinator = banner(&client);

    let first = client.enqueue_load_success(AdFormat::Banner);
    coordinator.enable();
    settle().await;

    let second = client.enqueue_load_success(AdFormat::Banner);
    coordinator.enable();
    settle().await;

    assert!(first.is_destroyed());
    assert!(!second.is_destroyed());
    assert_eq!(client.load_calls(AdFormat::Banner).len(), 2);
}

#[tokio::test]
async fn enable_abandons_an_in_flight_load() {
    let client = test_client();
    let coordinator = banner(&client);

    let gate = client.enqueue_deferred_load(AdFormat::Banner);
    coordinator.enable();
    settle().await;

    let replacement = client.enqueue_load_success(AdFormat::Banner);
    coordinator.enable();
    settle().await;

    // The first load completes only now; its handle must be discarded.
    let abandoned = gate.succeed();
    settle().await;

    assert!(abandoned.is_destroyed());
    assert!(!replacement.is_destroyed());
}

#[tokio::test]
async fn disable_destroys_the_banner_and_is_idempotent() {
    let client = test_client();
    let coordinator = banner(&client);

    // Disabling before anything was enabled is a no-op.
    coordinator.disable();
    settle().await;
    assert!(client.load_calls(AdFormat::Banner).is_empty());

    let controller = client.enqueue_load_success(AdFormat::Banner);
    coordinator.enable();
    settle().await;

    coordinator.disable();
    assert!(controller.is_destroyed());

    coordinator.disable();
    settle().await;
    assert_eq!(client.load_calls(AdFormat::Banner).len(), 1);
}

#[tokio::test]
async fn visibility_tracks_fullscreen_events_without_reloading() {
    let client = test_client();
    let coordinator = banner(&client);
    let controller = client.enqueue_load_success(AdFormat::Banner);
    coordinator.enable();
    settle().await;

    assert!(!coordinator.is_visible());
    controller.open();
    settle().await;
    assert!(coordinator.is_visible());

    controller.close();
    settle().await;
    assert!(!coordinator.is_visible());
    // Banners are not consumed by viewing: no reload on close.
    assert_eq!(client.load_calls(AdFormat::Banner).len(), 1);
    assert!(!controller.is_destroyed());
}

#[tokio::test]
async fn refresh_is_a_logged_noop() {
    let client = test_client();
    let coordinator = banner(&client);

    coordinator.refresh();
    settle().await;

    assert!(client.load_calls(AdFormat::Banner).is_empty());
}

#[tokio::test]
async fn load_failure_leaves_the_banner_disabled() {
    let client = test_client();
    let coordinator = banner(&client);
    client.enqueue_load_failure(AdFormat::Banner, LoadError::NoFill);

    coordinator.enable();
    settle().await;

    assert_eq!(client.load_calls(AdFormat::Banner).len(), 1);
    assert!(!coordinator.is_visible());
}

#[tokio::test]
async fn facade_banner_controls_delegate_to_the_coordinator() {
    let client = test_client();
    let config = AdsConfig::default();
    let ads = AdService::new(client.clone(), config.clone(), Platform::Ios);
    let controller = client.enqueue_load_success(AdFormat::Banner);

    ads.show_banner();
    settle().await;
    let calls = client.load_calls(AdFormat::Banner);
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].placement_id,
        config.placement_id(AdFormat::Banner, Platform::Ios)
    );
    assert_eq!(calls[0].banner_layout, Some(config.banner_layout));

    controller.open();
    settle().await;
    assert!(ads.is_banner_visible());

    ads.hide_banner();
    assert!(controller.is_destroyed());

    ads.refresh_banner();
    settle().await;
    assert_eq!(client.load_calls(AdFormat::Banner).len(), 1);
}

#[tokio::test]
async fn events_from_a_replaced_banner_are_ignored() {
    let client = test_client();
    let coordinator = banner(&client);

    let first = client.enqueue_load_success(AdFormat::Banner);
    coordinator.enable();
    settle().await;

    let _second = client.enqueue_load_success(AdFormat::Banner);
    coordinator.enable();
    settle().await;
    assert!(first.is_destroyed());

    first.open();
    settle().await;
    assert!(!coordinator.is_visible());
}
