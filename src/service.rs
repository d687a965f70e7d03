use std::sync::Arc;
use tokio::time::Duration;
use tracing::info;

use crate::client::{AdNetworkClient, InitError};
use crate::config::config_manager::AdsConfig;
use crate::coordinator::banner::BannerCoordinator;
use crate::coordinator::fullscreen::{FullscreenCoordinator, FullscreenKind};
use crate::coordinator::{OnClose, OnOpen};
use crate::model::placements::{AdFormat, Platform};

/// The façade the host application talks to. Composes the three
/// per-format coordinators behind one interface; no logic beyond
/// construction and delegation.
pub struct AdService {
    client: Arc<dyn AdNetworkClient>,
    banner: BannerCoordinator,
    interstitial: FullscreenCoordinator,
    rewarded: FullscreenCoordinator,
}

impl AdService {
    pub fn new(client: Arc<dyn AdNetworkClient>, config: AdsConfig, platform: Platform) -> Self {
        let retry = config.retry_after_load_failure_ms.map(Duration::from_millis);
        let banner = BannerCoordinator::new(
            Arc::clone(&client),
            config.placement_id(AdFormat::Banner, platform).to_string(),
            config.banner_layout,
        );
        let interstitial = FullscreenCoordinator::new(
            Arc::clone(&client),
            FullscreenKind::Interstitial,
            config.placement_id(AdFormat::Interstitial, platform).to_string(),
            retry,
        );
        let rewarded = FullscreenCoordinator::new(
            Arc::clone(&client),
            FullscreenKind::Rewarded,
            config.placement_id(AdFormat::Rewarded, platform).to_string(),
            retry,
        );
        Self {
            client,
            banner,
            interstitial,
            rewarded,
        }
    }

    /// Initialize the network client, then pre-load the full-screen
    /// formats. Banners load only when explicitly shown.
    pub async fn initialize(&self) -> Result<(), InitError> {
        self.client.initialize().await?;
        info!("ad network client initialized");
        self.interstitial.request_load();
        self.rewarded.request_load();
        Ok(())
    }

    pub fn show_banner(&self) {
        self.banner.enable();
    }

    pub fn hide_banner(&self) {
        self.banner.disable();
    }

    pub fn refresh_banner(&self) {
        self.banner.refresh();
    }

    pub fn show_interstitial(&self, on_open: OnOpen, on_close: OnClose) {
        self.interstitial.show(on_open, on_close);
    }

    pub fn show_rewarded(&self, on_open: OnOpen, on_close: OnClose) {
        self.rewarded.show(on_open, on_close);
    }

    pub fn is_interstitial_ready(&self) -> bool {
        self.interstitial.is_ready()
    }

    pub fn is_rewarded_ready(&self) -> bool {
        self.rewarded.is_ready()
    }

    pub fn is_banner_visible(&self) -> bool {
        self.banner.is_visible()
    }

    pub fn is_interstitial_visible(&self) -> bool {
        self.interstitial.is_visible()
    }

    pub fn is_rewarded_visible(&self) -> bool {
        self.rewarded.is_visible()
    }
}
