// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration handed to the page and to the widgets it hosts.
//!
//! The background, navigation menu, and screenshot gallery are external
//! widgets: the page only forwards these bundles to them. Nothing here is
//! validated. An empty image list or menu simply renders an empty widget.
//!
//! [`PageConfig::neurobits`] is the configuration of the Neurobits landing
//! page. With the `serde` feature every type here can be loaded from a
//! document; omitted banner fields fall back to their defaults.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dismissal::DEFAULT_STORAGE_KEY;

/// A linear RGB colour with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    /// Returns the components as an array, for uniform uploads.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.0, self.1, self.2]
    }
}

/// Parameters of the animated full-viewport background.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BackgroundConfig {
    /// Whether the wave animates over time.
    pub animated: bool,
    /// Whether the pointer distorts the wave.
    pub mouse_interactive: bool,
    /// Radius of the pointer's influence, as a fraction of the viewport.
    pub mouse_radius: f32,
    /// Number of quantised colour levels per channel.
    pub palette_size: u32,
    /// Wave amplitude.
    pub amplitude: f32,
    /// Wave frequency.
    pub frequency: f32,
    /// Wave speed.
    pub speed: f32,
    /// Base colour of the wave.
    pub base_color: Rgb,
}

impl BackgroundConfig {
    /// The purple ordered-dither wave used by the Neurobits page.
    #[must_use]
    pub const fn dither() -> Self {
        Self {
            animated: true,
            mouse_interactive: true,
            mouse_radius: 0.3,
            palette_size: 4,
            amplitude: 0.3,
            frequency: 3.0,
            speed: 0.05,
            base_color: Rgb(0.48, 0.15, 0.93),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self::dither()
    }
}

/// One link inside a navigation card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavLink {
    /// Visible text.
    pub label: String,
    /// Target URL or fragment.
    pub href: String,
    /// Accessible name.
    pub aria_label: String,
}

impl NavLink {
    /// Creates a link.
    #[must_use]
    pub fn new(label: &str, href: &str, aria_label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            aria_label: aria_label.to_string(),
        }
    }
}

/// One card of the navigation menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavItem {
    /// Card heading.
    pub label: String,
    /// CSS background colour.
    pub bg_color: String,
    /// CSS text colour.
    pub text_color: String,
    /// Links shown on the card.
    pub links: Vec<NavLink>,
}

/// Colours of the navigation bar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavColors {
    /// Bar background.
    pub base: String,
    /// Hamburger icon.
    pub menu: String,
    /// Call-to-action button background.
    pub button_bg: String,
    /// Call-to-action button text.
    pub button_text: String,
}

/// The navigation menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavConfig {
    /// Logo image URL.
    pub logo: String,
    /// Logo alternative text.
    pub logo_alt: String,
    /// Bar colours.
    pub colors: NavColors,
    /// Menu cards, left to right.
    pub items: Vec<NavItem>,
    /// Source repository linked from the bar.
    pub repository_url: String,
}

/// The screenshot gallery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShowcaseConfig {
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Whether the gallery rotates on its own.
    pub autoplay: bool,
    /// Whether hovering pauses the rotation.
    pub pause_on_hover: bool,
}

/// Heading text of the hero section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeroConfig {
    /// Product name.
    pub title: String,
    /// Tagline under the title.
    pub subtitle: String,
}

/// The leading icon of a banner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BannerIcon {
    /// A text glyph such as an emoji.
    Glyph(String),
    /// The built-in sparkles icon.
    #[default]
    Sparkles,
}

/// Inputs of a one-time dismissible banner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BannerProps {
    /// Rendered verbatim.
    pub message: String,
    /// Key under which the dismissal is persisted.
    #[cfg_attr(feature = "serde", serde(default = "default_storage_key"))]
    pub storage_key: String,
    /// Leading icon.
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: BannerIcon,
}

#[cfg(feature = "serde")]
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl BannerProps {
    /// A banner with the default key and icon.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            icon: BannerIcon::default(),
        }
    }

    /// Persists the dismissal under `key` instead of the default.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Uses `icon` as the leading icon.
    #[must_use]
    pub fn with_icon(mut self, icon: BannerIcon) -> Self {
        self.icon = icon;
        self
    }
}

/// Everything needed to assemble a page.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageConfig {
    /// Background widget parameters.
    pub background: BackgroundConfig,
    /// Navigation menu.
    pub nav: NavConfig,
    /// Hero heading.
    pub hero: HeroConfig,
    /// Screenshot gallery.
    pub showcase: ShowcaseConfig,
    /// Optional dismissible banner. Pages without one have no banner layer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub banner: Option<BannerProps>,
}

const REPOSITORY: &str = "https://github.com/hridaya423/neurobits";

const SCREENSHOTS: [&str; 7] = [
    "/screenshot-1-App Screenshot.png",
    "/screenshot-2-Tilted Right.png",
    "/screenshot-3-Tilted Right.png",
    "/screenshot-4-Hanged Up.png",
    "/screenshot-5-Tilted Left.png",
    "/screenshot-6-App Screenshot.png",
    "/screenshot-7-Tilted Left.png",
];

impl PageConfig {
    /// The Neurobits landing page, without a banner.
    #[must_use]
    pub fn neurobits() -> Self {
        let item = |label: &str, bg: &str, links: Vec<NavLink>| NavItem {
            label: label.to_string(),
            bg_color: bg.to_string(),
            text_color: "#FFFFFF".to_string(),
            links,
        };
        Self {
            background: BackgroundConfig::dither(),
            nav: NavConfig {
                logo: "/icon.png".to_string(),
                logo_alt: "Neurobits".to_string(),
                colors: NavColors {
                    base: "rgba(10, 6, 18, 0.7)".to_string(),
                    menu: "#E9D5FF".to_string(),
                    button_bg: "#7C3AED".to_string(),
                    button_text: "#FFFFFF".to_string(),
                },
                items: alloc::vec![
                    item(
                        "GitHub Repo",
                        "#7C3AED",
                        alloc::vec![
                            NavLink::new("View Repository", REPOSITORY, "View GitHub repository"),
                            NavLink::new(
                                "Contribute",
                                "https://github.com/hridaya423/neurobits/contribute",
                                "Contribute to the project",
                            ),
                        ],
                    ),
                    item(
                        "App Store Download",
                        "#5B21B6",
                        alloc::vec![
                            NavLink::new("Download on iOS", "#app-store", "Download on App Store"),
                            NavLink::new("View Screenshots", "#ios-screenshots", "View iOS screenshots"),
                        ],
                    ),
                    item(
                        "Play Store Download",
                        "#6D28D9",
                        alloc::vec![
                            NavLink::new("Download on Android", "#play-store", "Download on Play Store"),
                            NavLink::new(
                                "View Screenshots",
                                "#android-screenshots",
                                "View Android screenshots",
                            ),
                        ],
                    ),
                ],
                repository_url: REPOSITORY.to_string(),
            },
            hero: HeroConfig {
                title: "Neurobits".to_string(),
                subtitle: "Train your brain".to_string(),
            },
            showcase: ShowcaseConfig {
                images: SCREENSHOTS.iter().map(|s| (*s).to_string()).collect(),
                autoplay: true,
                pause_on_hover: true,
            },
            banner: None,
        }
    }

    /// Returns the same page with `banner` mounted above the content.
    #[must_use]
    pub fn with_banner(mut self, banner: BannerProps) -> Self {
        self.banner = Some(banner);
        self
    }
}
