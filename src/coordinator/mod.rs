pub mod banner;
pub mod fullscreen;

pub use banner::BannerCoordinator;
pub use fullscreen::{FullscreenCoordinator, FullscreenKind};

/// Host-supplied callback fired when an ad opens full screen content.
pub type OnOpen = Box<dyn FnOnce() + Send>;
/// Host-supplied callback fired when the show cycle ends; `true` means the
/// cycle completed successfully (for rewarded ads: the reward was earned).
pub type OnClose = Box<dyn FnOnce(bool) + Send>;

/// The caller-supplied open/close pair captured at `show` time. At most
/// one pair exists per format; a new accepted show overwrites the previous
/// pair, so superseded callbacks are never invoked.
pub(crate) struct PendingCallbacks {
    pub on_open: Option<OnOpen>,
    pub on_close: Option<OnClose>,
}

impl PendingCallbacks {
    pub fn new(on_open: OnOpen, on_close: OnClose) -> Self {
        Self {
            on_open: Some(on_open),
            on_close: Some(on_close),
        }
    }
}
