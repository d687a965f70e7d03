// src/config/config_manager.rs

use serde::{Serialize, Deserialize};
use std::fs;
use tracing::warn;

use crate::model::placements::{AdFormat, BannerLayout, Platform};

// Network sandbox placement identifiers, safe to ship in development builds.
fn default_android_banner_id() -> String {
    "ca-app-pub-3940256099942544/6300978111".to_string()
}
fn default_ios_banner_id() -> String {
    "ca-app-pub-3940256099942544/2934735716".to_string()
}
fn default_android_interstitial_id() -> String {
    "ca-app-pub-3940256099942544/1033173712".to_string()
}
fn default_ios_interstitial_id() -> String {
    "ca-app-pub-3940256099942544/4411468910".to_string()
}
fn default_android_rewarded_id() -> String {
    "ca-app-pub-3940256099942544/5224354917".to_string()
}
fn default_ios_rewarded_id() -> String {
    "ca-app-pub-3940256099942544/1712485313".to_string()
}

/// Placement identifiers and mediation policy. Loaded once at
/// construction, immutable afterwards.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdsConfig {
    #[serde(default = "default_android_banner_id")]
    pub android_banner_id: String,
    #[serde(default = "default_ios_banner_id")]
    pub ios_banner_id: String,
    #[serde(default = "default_android_interstitial_id")]
    pub android_interstitial_id: String,
    #[serde(default = "default_ios_interstitial_id")]
    pub ios_interstitial_id: String,
    #[serde(default = "default_android_rewarded_id")]
    pub android_rewarded_id: String,
    #[serde(default = "default_ios_rewarded_id")]
    pub ios_rewarded_id: String,
    /// Delay before retrying a failed full-screen load, in milliseconds.
    /// `None` disables the retry entirely.
    #[serde(default)]
    pub retry_after_load_failure_ms: Option<u64>,
    #[serde(default)]
    pub banner_layout: BannerLayout,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            android_banner_id: default_android_banner_id(),
            ios_banner_id: default_ios_banner_id(),
            android_interstitial_id: default_android_interstitial_id(),
            ios_interstitial_id: default_ios_interstitial_id(),
            android_rewarded_id: default_android_rewarded_id(),
            ios_rewarded_id: default_ios_rewarded_id(),
            retry_after_load_failure_ms: None,
            banner_layout: BannerLayout::default(),
        }
    }
}

impl AdsConfig {
    /// Resolve the placement identifier for a format on a platform.
    /// Unrecognized platforms resolve to an empty string.
    pub fn placement_id(&self, format: AdFormat, platform: Platform) -> &str {
        match (format, platform) {
            (AdFormat::Banner, Platform::Android) => &self.android_banner_id,
            (AdFormat::Banner, Platform::Ios) => &self.ios_banner_id,
            (AdFormat::Interstitial, Platform::Android) => &self.android_interstitial_id,
            (AdFormat::Interstitial, Platform::Ios) => &self.ios_interstitial_id,
            (AdFormat::Rewarded, Platform::Android) => &self.android_rewarded_id,
            (AdFormat::Rewarded, Platform::Ios) => &self.ios_rewarded_id,
            (_, Platform::Unknown) => "",
        }
    }
}

pub trait ConfigAdapter: Send + Sync {
    fn get_ads_config(&self) -> AdsConfig;
}

pub struct FileConfigAdapter {
    pub config_file: String,
}

impl FileConfigAdapter {
    pub fn new(config_file: &str) -> Self {
        Self {
            config_file: config_file.to_string(),
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn get_ads_config(&self) -> AdsConfig {
        let content = match fs::read_to_string(&self.config_file) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %self.config_file, error = %e, "ads config not readable, using defaults");
                return AdsConfig::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(file = %self.config_file, error = %e, "ads config not parseable, using defaults");
                AdsConfig::default()
            }
        }
    }
}
