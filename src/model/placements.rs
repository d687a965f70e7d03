// src/model/placements.rs

use serde::{Serialize, Deserialize};
use std::convert::TryFrom;

/// The three ad surfaces the mediator manages.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum AdFormat {
    Banner = 1,
    Interstitial = 2,
    Rewarded = 3,
}

impl TryFrom<u8> for AdFormat {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AdFormat::Banner),
            2 => Ok(AdFormat::Interstitial),
            3 => Ok(AdFormat::Rewarded),
            _ => Err(format!("Invalid value for AdFormat: {}", value)),
        }
    }
}

impl From<AdFormat> for u8 {
    fn from(format: AdFormat) -> Self {
        format as u8
    }
}

impl AdFormat {
    pub fn label(self) -> &'static str {
        match self {
            AdFormat::Banner => "banner",
            AdFormat::Interstitial => "interstitial",
            AdFormat::Rewarded => "rewarded",
        }
    }
}

/// Host platform, used only to pick a placement identifier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BannerSize {
    /// 320x50
    Standard,
    /// 300x250
    MediumRectangle,
    /// 728x90
    Leaderboard,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BannerPosition {
    Top,
    Bottom,
}

/// Fixed size/position anchor a banner is created with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerLayout {
    pub size: BannerSize,
    pub position: BannerPosition,
}

impl Default for BannerLayout {
    fn default() -> Self {
        Self {
            size: BannerSize::Standard,
            position: BannerPosition::Bottom,
        }
    }
}
