// src/client/mod.rs

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::model::placements::{AdFormat, BannerLayout};

/// Callback fired by the network client when a rewarded ad grants its reward.
pub type RewardCallback = Box<dyn FnOnce() + Send>;

/// One load request handed to the network client.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub format: AdFormat,
    pub placement_id: String,
    /// Present only for banner loads.
    pub banner_layout: Option<BannerLayout>,
}

/// One loaded, not-yet-shown ad instance owned by the network client.
/// A handle is single-use: once its show cycle ends it is destroyed.
pub trait AdHandle: Send + Sync {
    fn can_show(&self) -> bool;
    fn show(&self, on_reward: Option<RewardCallback>);
    fn destroy(&self);
}

/// A successful load: the handle plus its lifecycle event stream.
pub struct LoadedAd {
    pub handle: Box<dyn AdHandle>,
    pub events: UnboundedReceiver<AdEvent>,
}

/// Lifecycle events emitted by the network client for a single handle.
/// `Opened` always precedes `Closed` / `FailedToOpen`.
#[derive(Debug, Clone, PartialEq)]
pub enum AdEvent {
    Opened,
    Closed,
    FailedToOpen { reason: String },
    Paid { value_micros: i64, currency: String },
    ImpressionRecorded,
    Clicked,
}

/// Why the network client refused or lost a load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("ad network returned no fill")]
    NoFill,
    #[error("invalid placement identifier: {0}")]
    InvalidPlacement(String),
    #[error("load request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum InitError {
    #[error("ad network initialization failed: {0}")]
    Failed(String),
}

/// The external ad-network SDK boundary. Serving, bidding and rendering
/// all live behind this trait; the mediator only orchestrates it.
#[async_trait]
pub trait AdNetworkClient: Send + Sync {
    /// Initialize the underlying SDK. Must complete before any load.
    async fn initialize(&self) -> Result<(), InitError>;

    /// Load one ad for `request`, resolving with a handle and its event
    /// stream, or with the reason the network refused the load.
    async fn load(&self, request: LoadRequest) -> Result<LoadedAd, LoadError>;
}
