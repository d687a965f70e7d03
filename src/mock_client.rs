// src/mock_client.rs

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::oneshot;

use crate::client::{
    AdEvent, AdHandle, AdNetworkClient, InitError, LoadError, LoadRequest, LoadedAd, RewardCallback,
};
use crate::model::placements::AdFormat;

/// Scripted stand-in for a real ad-network SDK, used by the integration
/// and property tests. Load outcomes are enqueued per format and consumed
/// in order; an empty queue answers with no-fill. Each successful load
/// hands the test a [`MockAdController`] that can emit lifecycle events
/// for the delivered handle.
pub struct MockAdNetworkClient {
    state: Mutex<MockState>,
    init_calls: AtomicUsize,
}

struct MockState {
    plans: HashMap<AdFormat, VecDeque<LoadPlan>>,
    load_calls: HashMap<AdFormat, Vec<LoadRequest>>,
}

enum LoadPlan {
    Success(LoadedAd),
    Failure(LoadError),
    Deferred(oneshot::Receiver<Result<LoadedAd, LoadError>>),
}

impl MockAdNetworkClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                plans: HashMap::new(),
                load_calls: HashMap::new(),
            }),
            init_calls: AtomicUsize::new(0),
        })
    }

    /// Enqueue a load that resolves immediately with a fresh handle.
    pub fn enqueue_load_success(&self, format: AdFormat) -> MockAdController {
        let (controller, loaded) = Self::new_handle();
        self.push_plan(format, LoadPlan::Success(loaded));
        controller
    }

    pub fn enqueue_load_failure(&self, format: AdFormat, error: LoadError) {
        self.push_plan(format, LoadPlan::Failure(error));
    }

    /// Enqueue a load that stays in flight until the returned gate
    /// resolves it.
    pub fn enqueue_deferred_load(&self, format: AdFormat) -> MockLoadGate {
        let (sender, receiver) = oneshot::channel();
        self.push_plan(format, LoadPlan::Deferred(receiver));
        MockLoadGate { sender }
    }

    /// Every load request recorded for `format`, oldest first.
    pub fn load_calls(&self, format: AdFormat) -> Vec<LoadRequest> {
        self.state
            .lock()
            .unwrap()
            .load_calls
            .get(&format)
            .cloned()
            .unwrap_or_default()
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    fn push_plan(&self, format: AdFormat, plan: LoadPlan) {
        self.state
            .lock()
            .unwrap()
            .plans
            .entry(format)
            .or_default()
            .push_back(plan);
    }

    fn new_handle() -> (MockAdController, LoadedAd) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shared = Arc::new(MockHandleShared {
            can_show: AtomicBool::new(true),
            show_calls: AtomicUsize::new(0),
            destroyed: AtomicBool::new(false),
            reward_callback: Mutex::new(None),
            events: events_tx,
        });
        let controller = MockAdController {
            shared: Arc::clone(&shared),
        };
        let loaded = LoadedAd {
            handle: Box::new(MockAdHandle { shared }),
            events: events_rx,
        };
        (controller, loaded)
    }
}

#[async_trait]
impl AdNetworkClient for MockAdNetworkClient {
    async fn initialize(&self) -> Result<(), InitError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self, request: LoadRequest) -> Result<LoadedAd, LoadError> {
        let plan = {
            let mut state = self.state.lock().unwrap();
            state
                .load_calls
                .entry(request.format)
                .or_default()
                .push(request.clone());
            state.plans.entry(request.format).or_default().pop_front()
        };
        match plan {
            Some(LoadPlan::Success(loaded)) => Ok(loaded),
            Some(LoadPlan::Failure(error)) => Err(error),
            Some(LoadPlan::Deferred(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(LoadError::Network("mock load gate dropped".to_string()))),
            None => Err(LoadError::NoFill),
        }
    }
}

struct MockHandleShared {
    can_show: AtomicBool,
    show_calls: AtomicUsize,
    destroyed: AtomicBool,
    reward_callback: Mutex<Option<RewardCallback>>,
    events: UnboundedSender<AdEvent>,
}

struct MockAdHandle {
    shared: Arc<MockHandleShared>,
}

impl AdHandle for MockAdHandle {
    fn can_show(&self) -> bool {
        self.shared.can_show.load(Ordering::SeqCst)
    }

    fn show(&self, on_reward: Option<RewardCallback>) {
        self.shared.show_calls.fetch_add(1, Ordering::SeqCst);
        *self.shared.reward_callback.lock().unwrap() = on_reward;
    }

    fn destroy(&self) {
        self.shared.destroyed.store(true, Ordering::SeqCst);
    }
}

/// Test-side remote control for one mock handle: emit lifecycle events,
/// fire the captured reward callback, inspect show/destroy bookkeeping.
#[derive(Clone)]
pub struct MockAdController {
    shared: Arc<MockHandleShared>,
}

impl MockAdController {
    pub fn set_can_show(&self, value: bool) {
        self.shared.can_show.store(value, Ordering::SeqCst);
    }

    pub fn show_calls(&self) -> usize {
        self.shared.show_calls.load(Ordering::SeqCst)
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    pub fn emit(&self, event: AdEvent) {
        // The receiver side may already be gone when the handle was
        // replaced; late events are exactly what some tests exercise.
        let _ = self.shared.events.send(event);
    }

    pub fn open(&self) {
        self.emit(AdEvent::Opened);
    }

    pub fn close(&self) {
        self.emit(AdEvent::Closed);
    }

    pub fn fail_to_open(&self, reason: &str) {
        self.emit(AdEvent::FailedToOpen {
            reason: reason.to_string(),
        });
    }

    /// Fire the reward callback captured by the most recent `show`.
    pub fn earn_reward(&self) {
        if let Some(callback) = self.shared.reward_callback.lock().unwrap().take() {
            callback();
        }
    }
}

/// Completion gate for a deferred mock load.
pub struct MockLoadGate {
    sender: oneshot::Sender<Result<LoadedAd, LoadError>>,
}

impl MockLoadGate {
    /// Complete the in-flight load successfully.
    pub fn succeed(self) -> MockAdController {
        let (controller, loaded) = MockAdNetworkClient::new_handle();
        let _ = self.sender.send(Ok(loaded));
        controller
    }

    pub fn fail(self, error: LoadError) {
        let _ = self.sender.send(Err(error));
    }
}
