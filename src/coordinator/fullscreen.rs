// src/coordinator/fullscreen.rs

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::client::{AdEvent, AdHandle, AdNetworkClient, LoadError, LoadRequest, LoadedAd, RewardCallback};
use crate::coordinator::{OnClose, OnOpen, PendingCallbacks};
use crate::model::placements::AdFormat;

/// Which full-screen surface a coordinator drives. The two formats share
/// the whole load/show/reload cycle and differ only in the close `success`
/// value and the reward sub-callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenKind {
    Interstitial,
    Rewarded,
}

impl FullscreenKind {
    pub fn format(self) -> AdFormat {
        match self {
            FullscreenKind::Interstitial => AdFormat::Interstitial,
            FullscreenKind::Rewarded => AdFormat::Rewarded,
        }
    }
}

struct UnitState {
    handle: Option<Box<dyn AdHandle>>,
    pending: Option<PendingCallbacks>,
}

/// Owns one full-screen format's load/show/reload cycle: issue a load,
/// hold the loaded handle, show it on request, and re-load as soon as the
/// handle is consumed so the next show has an ad ready.
#[derive(Clone)]
pub struct FullscreenCoordinator {
    inner: Arc<FullscreenInner>,
}

struct FullscreenInner {
    client: Arc<dyn AdNetworkClient>,
    kind: FullscreenKind,
    placement_id: String,
    retry_after_load_failure: Option<Duration>,
    state: Mutex<UnitState>,
    // Epoch of the current handle slot. Bumped whenever the slot is
    // invalidated; completions and events stamped with an older epoch are
    // discarded.
    generation: AtomicU64,
    visible: AtomicBool,
    reward_earned: Arc<AtomicBool>,
}

impl FullscreenCoordinator {
    pub fn new(
        client: Arc<dyn AdNetworkClient>,
        kind: FullscreenKind,
        placement_id: String,
        retry_after_load_failure: Option<Duration>,
    ) -> Self {
        Self {
            inner: Arc::new(FullscreenInner {
                client,
                kind,
                placement_id,
                retry_after_load_failure,
                state: Mutex::new(UnitState {
                    handle: None,
                    pending: None,
                }),
                generation: AtomicU64::new(0),
                visible: AtomicBool::new(false),
                reward_earned: Arc::new(AtomicBool::new(false)),
            }),
        }
    }

    pub fn kind(&self) -> FullscreenKind {
        self.inner.kind
    }

    /// True when a loaded handle is held and reports showable.
    pub fn is_ready(&self) -> bool {
        let state = self.inner.state.lock().unwrap();
        state.handle.as_ref().map(|h| h.can_show()).unwrap_or(false)
    }

    /// True between the `opened` and `closed`/`failed-to-open` events of
    /// the most recent show cycle.
    pub fn is_visible(&self) -> bool {
        self.inner.visible.load(Ordering::SeqCst)
    }

    /// Release any stale handle and issue a new asynchronous load. A load
    /// still in flight from an earlier request is abandoned; its eventual
    /// completion is discarded.
    pub fn request_load(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let stale = self.inner.state.lock().unwrap().handle.take();
        if let Some(handle) = stale {
            debug!(format = self.label(), "destroying stale handle before load");
            handle.destroy();
        }
        if self.inner.placement_id.is_empty() {
            warn!(format = self.label(), "no placement identifier configured, skipping load");
            return;
        }
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            format = self.label(),
            placement_id = %self.inner.placement_id,
            "loading ad"
        );
        let coordinator = self.clone();
        tokio::spawn(async move {
            let request = LoadRequest {
                format: coordinator.inner.kind.format(),
                placement_id: coordinator.inner.placement_id.clone(),
                banner_layout: None,
            };
            let result = coordinator.inner.client.load(request).await;
            coordinator.finish_load(generation, request_id, result);
        });
    }

    /// Show the loaded ad. Precondition checked here: a handle is held and
    /// reports showable. When it is not, the call only logs; neither
    /// callback is stored nor invoked.
    pub fn show(&self, on_open: OnOpen, on_close: OnClose) {
        let mut state = self.inner.state.lock().unwrap();
        let ready = state.handle.as_ref().map(|h| h.can_show()).unwrap_or(false);
        if !ready {
            info!(format = self.label(), "ad is not ready yet");
            return;
        }
        state.pending = Some(PendingCallbacks::new(on_open, on_close));
        let on_reward = match self.inner.kind {
            FullscreenKind::Interstitial => None,
            FullscreenKind::Rewarded => {
                self.inner.reward_earned.store(false, Ordering::SeqCst);
                let earned = Arc::clone(&self.inner.reward_earned);
                Some(Box::new(move || earned.store(true, Ordering::SeqCst)) as RewardCallback)
            }
        };
        info!(format = self.label(), "showing ad");
        if let Some(handle) = state.handle.as_ref() {
            handle.show(on_reward);
        }
    }

    fn label(&self) -> &'static str {
        self.inner.kind.format().label()
    }

    fn finish_load(&self, generation: u64, request_id: Uuid, result: Result<LoadedAd, LoadError>) {
        match result {
            Ok(loaded) => {
                let LoadedAd { handle, events } = loaded;
                let mut slot = Some(handle);
                {
                    let mut state = self.inner.state.lock().unwrap();
                    if self.inner.generation.load(Ordering::SeqCst) == generation {
                        state.handle = slot.take();
                    }
                }
                if let Some(handle) = slot {
                    debug!(%request_id, format = self.label(), "load superseded, destroying delivered handle");
                    handle.destroy();
                    return;
                }
                info!(%request_id, format = self.label(), "ad loaded");
                self.pump_events(generation, events);
            }
            Err(e) => {
                error!(%request_id, format = self.label(), error = %e, "ad failed to load");
                if self.inner.generation.load(Ordering::SeqCst) == generation {
                    self.schedule_load_retry(generation);
                }
            }
        }
    }

    fn schedule_load_retry(&self, generation: u64) {
        let Some(delay) = self.inner.retry_after_load_failure else {
            return;
        };
        info!(
            format = self.label(),
            delay_ms = delay.as_millis() as u64,
            "scheduling load retry"
        );
        let coordinator = self.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            if coordinator.inner.generation.load(Ordering::SeqCst) == generation {
                coordinator.request_load();
            } else {
                debug!(format = coordinator.label(), "load retry superseded");
            }
        });
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
            debug!(format = self.label(), ?event, "ignoring event from a superseded handle");
            return;
        }
        match event {
            AdEvent::Opened => {
                info!(format = self.label(), "ad opened full screen content");
                self.inner.visible.store(true, Ordering::SeqCst);
                let on_open = {
                    let mut state = self.inner.state.lock().unwrap();
                    state.pending.as_mut().and_then(|p| p.on_open.take())
                };
                if let Some(on_open) = on_open {
                    on_open();
                }
            }
            AdEvent::Closed => {
                info!(format = self.label(), "ad closed full screen content");
                let success = match self.inner.kind {
                    FullscreenKind::Interstitial => true,
                    FullscreenKind::Rewarded => self.inner.reward_earned.load(Ordering::SeqCst),
                };
                self.consume(success);
            }
            AdEvent::FailedToOpen { reason } => {
                error!(format = self.label(), %reason, "ad failed to open full screen content");
                self.consume(false);
            }
            AdEvent::Paid { value_micros, currency } => {
                info!(format = self.label(), value_micros, %currency, "ad paid");
            }
            AdEvent::ImpressionRecorded => {
                info!(format = self.label(), "ad recorded an impression");
            }
            AdEvent::Clicked => {
                info!(format = self.label(), "ad was clicked");
            }
        }
    }

    // Shared close/fail path: notify the host, drop the consumed handle and
    // immediately request the next load so another ad can be shown as soon
    // as possible. The callback runs outside the state lock, so a host may
    // call `show` again from inside `on_close`.
    fn consume(&self, success: bool) {
        self.inner.visible.store(false, Ordering::SeqCst);
        let (handle, on_close) = {
            let mut state = self.inner.state.lock().unwrap();
            let on_close = state.pending.take().and_then(|p| p.on_close);
            (state.handle.take(), on_close)
        };
        if let Some(on_close) = on_close {
            on_close(success);
        }
        if let Some(handle) = handle {
            handle.destroy();
        }
        self.request_load();
    }
}
