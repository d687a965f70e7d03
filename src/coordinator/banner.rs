use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::client::{AdEvent, AdHandle, AdNetworkClient, LoadRequest, LoadedAd};
use crate::model::placements::{AdFormat, BannerLayout};

/// Drives the single persistent banner surface. Banners have no caller
/// open/close contract and are not consumed by viewing, so there is no
/// pending-callback state and no reload on close.
#[derive(Clone)]
pub struct BannerCoordinator {
    inner: Arc<BannerInner>,
}

struct BannerInner {
    client: Arc<dyn AdNetworkClient>,
    placement_id: String,
    layout: BannerLayout,
    handle: Mutex<Option<Box<dyn AdHandle>>>,
    // Epoch of the current banner slot; see FullscreenCoordinator.
    generation: AtomicU64,
    visible: AtomicBool,
}

impl BannerCoordinator {
    pub fn new(client: Arc<dyn AdNetworkClient>, placement_id: String, layout: BannerLayout) -> Self {
        Self {
            inner: Arc::new(BannerInner {
                client,
                placement_id,
                layout,
                handle: Mutex::new(None),
                generation: AtomicU64::new(0),
                visible: AtomicBool::new(false),
            }),
        }
    }

    /// Create a banner at the configured anchor and load it. An existing
    /// banner (or an in-flight load) is torn down first, so enabling twice
    /// replaces rather than stacks.
    pub fn enable(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(old) = self.inner.handle.lock().unwrap().take() {
            info!("destroying banner view before replacement");
            old.destroy();
        }
        if self.inner.placement_id.is_empty() {
            warn!("no banner placement identifier configured, skipping load");
            return;
        }
        let request_id = Uuid::new_v4();
        info!(%request_id, placement_id = %self.inner.placement_id, "loading banner ad");
        let coordinator = self.clone();
        tokio::spawn(async move {
            let request = LoadRequest {
                format: AdFormat::Banner,
                placement_id: coordinator.inner.placement_id.clone(),
                banner_layout: Some(coordinator.inner.layout),
            };
            match coordinator.inner.client.load(request).await {
                Ok(loaded) => coordinator.store_banner(generation, request_id, loaded),
                Err(e) => error!(%request_id, error = %e, "banner view failed to load an ad"),
            }
        });
    }

    /// Tear down the banner if one exists; a no-op when already disabled.
    pub fn disable(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.inner.handle.lock().unwrap().take() {
            info!("destroying banner view");
            handle.destroy();
        }
    }

    /// Banner refresh is not supported; the call is a logged no-op.
    pub fn refresh(&self) {
        warn!("banner refresh is not implemented");
    }

    /// True between the `opened` and `closed` events most recently observed
    /// for the banner's full screen content.
    pub fn is_visible(&self) -> bool {
        self.inner.visible.load(Ordering::SeqCst)
    }

    fn store_banner(&self, generation: u64, request_id: Uuid, loaded: LoadedAd) {
        let LoadedAd { handle, events } = loaded;
        let mut slot = Some(handle);
        {
            let mut stored = self.inner.handle.lock().unwrap();
            if self.inner.generation.load(Ordering::SeqCst) == generation {
                *stored = slot.take();
            }
        }
        if let Some(handle) = slot {
            debug!(%request_id, "banner load superseded, destroying delivered handle");
            handle.destroy();
            return;
        }
        info!(%request_id, "banner view loaded an ad");
        self.pump_events(generation, events);
    }

    fn pump_events(&self, generation: u64, mut events: UnboundedReceiver<AdEvent>) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                coordinator.handle_event(generation, event);
            }
        });
    }

    fn handle_event(&self, generation: u64, event: AdEvent) {
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!(?event, "ignoring event from a replaced banner");
            return;
        }
        match event {
            AdEvent::Opened => {
                info!("banner view full screen content opened");
                self.inner.visible.store(true, Ordering::SeqCst);
            }
            AdEvent::Closed => {
                info!("banner view full screen content closed");
                self.inner.visible.store(false, Ordering::SeqCst);
            }
            AdEvent::FailedToOpen { reason } => {
                error!(%reason, "banner view failed to open full screen content");
            }
            AdEvent::Paid { value_micros, currency } => {
                info!(value_micros, %currency, "banner view paid");
            }
            AdEvent::ImpressionRecorded => {
                info!("banner view recorded an impression");
            }
            AdEvent::Clicked => {
                info!("banner view was clicked");
            }
        }
    }
}
