// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page markup.
//!
//! Builds the DOM for a [`PageConfig`]: one element per layer of the page
//! stack, laid out by the stylesheet in [`STYLE`]. The presenter adopts these
//! elements; the frame loop measures them back into region bounds.

use alloc::format;
use alloc::vec::Vec;

use strata_core::config::{BannerIcon, BannerProps, NavConfig, PageConfig, ShowcaseConfig};
use strata_core::page::{LayerRole, Region};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

const STYLE: &str = r"
html, body { margin: 0; height: 100%; overflow: hidden; background: #0a0612; }
body { font-family: system-ui, sans-serif; }
.background { position: fixed; top: 0; left: 0; width: 100%; height: 100vh; display: block; }
.content-wrapper { position: fixed; inset: 0; }
.hero { position: absolute; left: 8vw; top: 50%; transform: translateY(-50%); color: #fff; }
.hero h1 { font-family: Tinos, 'Times New Roman', serif; font-size: clamp(4rem, 10vw, 8rem); font-weight: 700; line-height: 1; letter-spacing: -0.02em; margin: 0 0 2rem; }
.hero p { font-family: Montserrat, sans-serif; font-size: clamp(1.25rem, 2.5vw, 1.875rem); font-weight: 300; letter-spacing: 0.05em; color: rgba(255, 255, 255, 0.6); margin: 0; }
.showcase { position: absolute; right: 6vw; top: 50%; width: 36vw; height: 420px; transform: translateY(-50%); perspective: 1200px; }
.gallery-ring { position: absolute; inset: 0; transform-style: preserve-3d; }
.gallery-ring img { position: absolute; left: 50%; top: 50%; width: 160px; margin: -160px 0 0 -80px; border-radius: 16px; backface-visibility: hidden; }
@media (max-width: 1023px) { .showcase { display: none; } }
.card-nav { position: absolute; left: 50%; top: 2rem; width: 90%; max-width: 800px; transform: translateX(-50%); border-radius: 12px; backdrop-filter: blur(12px); }
.card-nav-bar { display: flex; align-items: center; justify-content: space-between; height: 60px; padding: 0 1rem; }
.card-nav-bar img { height: 28px; }
.card-nav-toggle { background: none; border: 0; cursor: pointer; font-size: 1.5rem; }
.card-nav-cta { border-radius: 8px; padding: 0.5rem 1rem; text-decoration: none; font-weight: 500; }
.card-nav-cards { display: none; gap: 8px; padding: 0 8px 8px; }
.card-nav.open .card-nav-cards { display: flex; }
.card-nav-card { flex: 1; border-radius: 8px; padding: 12px 16px; min-height: 120px; }
.card-nav-card h2 { font-size: 1.375rem; font-weight: 400; margin: 0 0 1rem; }
.card-nav-card a { display: block; color: inherit; text-decoration: none; margin-top: 0.25rem; }
.banner { position: fixed; top: 0; left: 0; right: 0; background: linear-gradient(135deg, #8B5CF6 0%, #7C3AED 50%, #6D28D9 100%); border-bottom: 2px solid rgba(233, 213, 255, 0.2); box-shadow: 0 4px 24px rgba(124, 58, 237, 0.3); display: flex; align-items: center; gap: 1.5rem; padding: 1.25rem 2rem; }
.banner-body { flex: 1; display: flex; align-items: center; justify-content: center; gap: 0.75rem; }
.banner-icon { display: flex; align-items: center; justify-content: center; width: 2rem; height: 2rem; border-radius: 9999px; background: rgba(255, 255, 255, 0.2); color: #fff; }
.banner-message { color: #fff; font-weight: 600; font-size: 1.125rem; letter-spacing: -0.01em; margin: 0; }
.banner-dismiss { display: flex; align-items: center; justify-content: center; width: 2rem; height: 2rem; border: 0; border-radius: 8px; background: none; color: #fff; cursor: pointer; }
.banner-dismiss:hover { background: rgba(255, 255, 255, 0.2); }
";

const SPARKLES_SVG: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M9.937 15.5A2 2 0 0 0 8.5 14.063l-6.135-1.582a.5.5 0 0 1 0-.962L8.5 9.936A2 2 0 0 0 9.937 8.5l1.582-6.135a.5.5 0 0 1 .963 0L14.063 8.5A2 2 0 0 0 15.5 9.937l6.135 1.581a.5.5 0 0 1 0 .964L15.5 14.063a2 2 0 0 0-1.437 1.437l-1.582 6.135a.5.5 0 0 1-.963 0z"/></svg>"#;

const CLOSE_SVG: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"><path d="M18 6 6 18"/><path d="m6 6 12 12"/></svg>"#;

/// Distance of each screenshot from the gallery's axis, in CSS pixels.
const GALLERY_RADIUS: f64 = 360.0;

/// The elements backing the page's layers.
#[derive(Debug)]
pub(crate) struct Markup {
    pub(crate) background: HtmlCanvasElement,
    pub(crate) wrapper: HtmlElement,
    hero: HtmlElement,
    showcase: HtmlElement,
    gallery_ring: HtmlElement,
    pub(crate) nav: HtmlElement,
    pub(crate) nav_toggle: HtmlElement,
    banner: Option<HtmlElement>,
    pub(crate) dismiss: Option<HtmlElement>,
}

impl Markup {
    /// Appends the page to `body`.
    pub(crate) fn build(doc: &Document, body: &HtmlElement, config: &PageConfig) -> Result<Self, JsValue> {
        let style = doc.create_element("style")?;
        style.set_text_content(Some(STYLE));
        if let Some(head) = doc.head() {
            head.append_child(&style)?;
        } else {
            body.append_child(&style)?;
        }

        let background: HtmlCanvasElement = element(doc, "canvas", "background")?.unchecked_into();
        body.append_child(&background)?;

        let wrapper = element(doc, "div", "content-wrapper")?;
        body.append_child(&wrapper)?;

        let hero = element(doc, "section", "hero")?;
        let title = element(doc, "h1", "")?;
        title.set_text_content(Some(&config.hero.title));
        let subtitle = element(doc, "p", "")?;
        subtitle.set_text_content(Some(&config.hero.subtitle));
        hero.append_child(&title)?;
        hero.append_child(&subtitle)?;
        wrapper.append_child(&hero)?;

        let (showcase, gallery_ring) = build_showcase(doc, &config.showcase)?;
        wrapper.append_child(&showcase)?;

        let (nav, nav_toggle) = build_nav(doc, &config.nav)?;
        wrapper.append_child(&nav)?;

        let (banner, dismiss) = match &config.banner {
            Some(props) => {
                let (banner, dismiss) = build_banner(doc, props)?;
                wrapper.append_child(&banner)?;
                (Some(banner), Some(dismiss))
            }
            None => (None, None),
        };

        Ok(Self {
            background,
            wrapper,
            hero,
            showcase,
            gallery_ring,
            nav,
            nav_toggle,
            banner,
            dismiss,
        })
    }

    /// Returns the element backing each layer, for the presenter to adopt.
    pub(crate) fn layers(&self) -> Vec<(LayerRole, HtmlElement)> {
        let mut layers = alloc::vec![
            (LayerRole::Background, self.background.clone().unchecked_into()),
            (LayerRole::ContentWrapper, self.wrapper.clone()),
        ];
        for region in Region::ALL {
            if let Some((el, _)) = self.region(region) {
                layers.push((LayerRole::Region(region), el.clone()));
            }
        }
        layers
    }

    /// Returns a region's element and the element its bounds are relative
    /// to.
    pub(crate) fn region(&self, region: Region) -> Option<(&HtmlElement, &HtmlElement)> {
        match region {
            Region::Hero => Some((&self.hero, &self.wrapper)),
            Region::Showcase => Some((&self.showcase, &self.wrapper)),
            Region::Navigation => Some((&self.nav, &self.wrapper)),
            Region::Banner => Some((self.banner.as_ref()?, &self.wrapper)),
            Region::BannerDismiss => Some((self.dismiss.as_ref()?, self.banner.as_ref()?)),
        }
    }

    /// Turns the gallery to `degrees`.
    pub(crate) fn turn_gallery(&self, degrees: f64) {
        let _ = self
            .gallery_ring
            .style()
            .set_property("transform", &format!("rotateY({degrees}deg)"));
    }
}

fn element(doc: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el: Element = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el.unchecked_into())
}

fn build_showcase(doc: &Document, config: &ShowcaseConfig) -> Result<(HtmlElement, HtmlElement), JsValue> {
    let showcase = element(doc, "div", "showcase")?;
    let ring = element(doc, "div", "gallery-ring")?;
    let count = config.images.len();
    for (i, src) in config.images.iter().enumerate() {
        let img = element(doc, "img", "")?;
        img.set_attribute("src", src)?;
        img.set_attribute("alt", &format!("Screenshot {}", i + 1))?;
        img.set_attribute("draggable", "false")?;
        img.style().set_property(
            "transform",
            &format!("rotateY({}deg) translateZ({GALLERY_RADIUS}px)", face_angle(i, count)),
        )?;
        ring.append_child(&img)?;
    }
    showcase.append_child(&ring)?;
    Ok((showcase, ring))
}

fn build_nav(doc: &Document, config: &NavConfig) -> Result<(HtmlElement, HtmlElement), JsValue> {
    let nav = element(doc, "nav", "card-nav")?;
    nav.style().set_property("background", &config.colors.base)?;

    let bar = element(doc, "div", "card-nav-bar")?;
    let toggle = element(doc, "button", "card-nav-toggle")?;
    toggle.set_attribute("aria-label", "Open menu")?;
    toggle.set_text_content(Some("\u{2630}"));
    toggle.style().set_property("color", &config.colors.menu)?;
    bar.append_child(&toggle)?;

    let logo = element(doc, "img", "")?;
    logo.set_attribute("src", &config.logo)?;
    logo.set_attribute("alt", &config.logo_alt)?;
    bar.append_child(&logo)?;

    let cta = element(doc, "a", "card-nav-cta")?;
    cta.set_attribute("href", &config.repository_url)?;
    cta.set_text_content(Some("GitHub"));
    let s = cta.style();
    s.set_property("background", &config.colors.button_bg)?;
    s.set_property("color", &config.colors.button_text)?;
    bar.append_child(&cta)?;
    nav.append_child(&bar)?;

    let cards = element(doc, "div", "card-nav-cards")?;
    for item in &config.items {
        let card = element(doc, "div", "card-nav-card")?;
        let s = card.style();
        s.set_property("background", &item.bg_color)?;
        s.set_property("color", &item.text_color)?;
        let heading = element(doc, "h2", "")?;
        heading.set_text_content(Some(&item.label));
        card.append_child(&heading)?;
        for link in &item.links {
            let a = element(doc, "a", "")?;
            a.set_attribute("href", &link.href)?;
            a.set_attribute("aria-label", &link.aria_label)?;
            a.set_text_content(Some(&link.label));
            card.append_child(&a)?;
        }
        cards.append_child(&card)?;
    }
    nav.append_child(&cards)?;
    Ok((nav, toggle))
}

fn build_banner(doc: &Document, props: &BannerProps) -> Result<(HtmlElement, HtmlElement), JsValue> {
    let banner = element(doc, "div", "banner")?;
    banner.set_attribute("role", "status")?;

    let body = element(doc, "div", "banner-body")?;
    body.append_child(&banner_icon(doc, &props.icon)?)?;
    let message = element(doc, "p", "banner-message")?;
    message.set_text_content(Some(&props.message));
    body.append_child(&message)?;
    body.append_child(&banner_icon(doc, &props.icon)?)?;
    banner.append_child(&body)?;

    let dismiss = element(doc, "button", Region::BannerDismiss.as_str())?;
    dismiss.set_attribute("aria-label", "Dismiss banner")?;
    dismiss.set_inner_html(CLOSE_SVG);
    banner.append_child(&dismiss)?;
    Ok((banner, dismiss))
}

fn banner_icon(doc: &Document, icon: &BannerIcon) -> Result<HtmlElement, JsValue> {
    let el = element(doc, "div", "banner-icon")?;
    el.set_attribute("aria-hidden", "true")?;
    match icon {
        BannerIcon::Glyph(glyph) => el.set_text_content(Some(glyph)),
        BannerIcon::Sparkles => el.set_inner_html(SPARKLES_SVG),
    }
    Ok(el)
}

/// Angle of the `i`th of `count` screenshots around the gallery ring.
fn face_angle(i: usize, count: usize) -> f64 {
    let count = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
    let i = u32::try_from(i).unwrap_or(u32::MAX);
    360.0 * f64::from(i) / f64::from(count)
}

/// Degrees per second the gallery turns while autoplaying.
const GALLERY_SPEED: f64 = 9.0;

/// Returns the gallery angle after `delta_secs`, holding still when autoplay
/// is off or the pointer rests on it and hovering pauses it.
pub(crate) fn advance_gallery(degrees: f64, delta_secs: f64, config: &ShowcaseConfig, hovered: bool) -> f64 {
    if !config.autoplay || (config.pause_on_hover && hovered) {
        return degrees;
    }
    (degrees - GALLERY_SPEED * delta_secs.max(0.0)) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showcase(autoplay: bool, pause_on_hover: bool) -> ShowcaseConfig {
        ShowcaseConfig {
            images: Vec::new(),
            autoplay,
            pause_on_hover,
        }
    }

    #[test]
    fn screenshots_are_spread_evenly() {
        assert_eq!(face_angle(0, 4), 0.0);
        assert_eq!(face_angle(1, 4), 90.0);
        assert_eq!(face_angle(3, 4), 270.0);
    }

    #[test]
    fn empty_gallery_does_not_divide_by_zero() {
        assert_eq!(face_angle(0, 0), 0.0);
    }

    #[test]
    fn gallery_turns_while_autoplaying() {
        let turned = advance_gallery(0.0, 2.0, &showcase(true, true), false);
        assert_eq!(turned, -18.0);
    }

    #[test]
    fn hovering_pauses_the_gallery() {
        assert_eq!(advance_gallery(42.0, 1.0, &showcase(true, true), true), 42.0);
        assert_eq!(advance_gallery(42.0, 1.0, &showcase(true, false), true), 33.0);
    }

    #[test]
    fn gallery_without_autoplay_stays_put() {
        assert_eq!(advance_gallery(10.0, 5.0, &showcase(false, false), false), 10.0);
    }
}
