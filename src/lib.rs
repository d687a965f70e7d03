//! Mediation layer between a host application and an external ad network.
//!
//! The crate owns the lifecycle of three ad surfaces (banner, interstitial
//! and rewarded) on top of a pluggable [`AdNetworkClient`]:
//! it decides when to load, when a surface is showable, and how open/close
//! results propagate back to the host. Ad serving, bidding and rendering
//! stay inside the network client; every failure is absorbed here and
//! degrades to "ad unavailable" instead of reaching the host as an error.
//!
//! ```no_run
//! use ad_mediator::{AdService, AdsConfig, MockAdNetworkClient, Platform};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = MockAdNetworkClient::new();
//!     let ads = AdService::new(client, AdsConfig::default(), Platform::Android);
//!     ads.initialize().await.expect("ad network init");
//!     if ads.is_interstitial_ready() {
//!         ads.show_interstitial(
//!             Box::new(|| println!("opened")),
//!             Box::new(|success| println!("closed, success={success}")),
//!         );
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod coordinator;
pub mod mock_client;
pub mod model;
pub mod service;

pub use client::{
    AdEvent, AdHandle, AdNetworkClient, InitError, LoadError, LoadRequest, LoadedAd, RewardCallback,
};
pub use config::{AdsConfig, ConfigAdapter, FileConfigAdapter};
pub use coordinator::{BannerCoordinator, FullscreenCoordinator, FullscreenKind, OnClose, OnOpen};
pub use mock_client::{MockAdController, MockAdNetworkClient, MockLoadGate};
pub use model::placements::{AdFormat, BannerLayout, BannerPosition, BannerSize, Platform};
pub use service::AdService;
