// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The landing page stack.
//!
//! [`Page::new`] assembles the standard stack, bottom to top:
//!
//! ```text
//!   Background        Capture       full viewport, receives everything else
//!   └ (sibling) ContentWrapper  PassThrough   full viewport
//!       ├ Hero          Capture
//!       ├ Showcase      Capture
//!       ├ Navigation    Capture
//!       └ Banner        Capture       only with a banner, hidden until settled
//!           └ BannerDismiss  Capture
//! ```
//!
//! Regions start with zero bounds and capture nothing until the host measures
//! them with [`Page::set_region_bounds`]. Every mutation re-evaluates the
//! store immediately so hit testing always sees current geometry; the
//! accumulated [`FrameChanges`] are handed out by [`Page::evaluate`] for the
//! presenter.
//!
//! A press and release of the same pointer on the dismiss control is a click
//! and dismisses the banner.

use kurbo::{Point, Rect, Size};

use crate::config::{BannerProps, PageConfig};
use crate::dismissal::{BannerViewState, DismissalGate, Dismissed};
use crate::layer::{FrameChanges, LayerId, LayerStore, PointerPolicy, StackError};
use crate::pointer::{PointerEvent, PointerHandler, PointerKind, PointerRouter};
use crate::storage::KeyValueStore;
use crate::trace::{
    BannerDismissedEvent, BannerSettledEvent, PointerRoutedEvent, RegionMeasuredEvent,
    StoreFaultEvent, StoreOp, Tracer,
};

/// An independently positioned, pointer-capturing part of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Title, tagline, and call to action.
    Hero,
    /// Screenshot gallery.
    Showcase,
    /// Navigation menu.
    Navigation,
    /// One-time dismissible banner.
    Banner,
    /// The dismiss control inside the banner.
    BannerDismiss,
}

impl Region {
    /// Every region, bottom to top.
    pub const ALL: [Self; 5] = [
        Self::Hero,
        Self::Showcase,
        Self::Navigation,
        Self::Banner,
        Self::BannerDismiss,
    ];

    /// Short lowercase name, for log lines and element ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Showcase => "showcase",
            Self::Navigation => "navigation",
            Self::Banner => "banner",
            Self::BannerDismiss => "banner-dismiss",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Hero => 0,
            Self::Showcase => 1,
            Self::Navigation => 2,
            Self::Banner => 3,
            Self::BannerDismiss => 4,
        }
    }
}

/// What a layer is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// The full-viewport interactive background.
    Background,
    /// The pass-through container of all regions.
    ContentWrapper,
    /// A region.
    Region(Region),
}

impl LayerRole {
    /// Short lowercase name, for log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::ContentWrapper => "content",
            Self::Region(region) => region.as_str(),
        }
    }
}

/// Result of [`Page::pointer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Routed {
    /// The single layer that received the event.
    pub target: LayerId,
    /// Its role.
    pub role: LayerRole,
    /// Event position relative to the target's world origin.
    pub local: Point,
    /// Whether a handler registered with [`Page::on_pointer`] ran.
    pub handled: bool,
    /// Whether this event completed a click on the dismiss control.
    pub dismissed: bool,
}

#[derive(Debug)]
struct MountedBanner {
    props: BannerProps,
    gate: DismissalGate,
}

/// A landing page: the layer stack, its pointer routing, and the banner's
/// dismissal state.
#[derive(Debug)]
pub struct Page {
    config: PageConfig,
    viewport: Size,
    store: LayerStore,
    router: PointerRouter,
    background: LayerId,
    wrapper: LayerId,
    regions: [Option<LayerId>; 5],
    banner: Option<MountedBanner>,
    pending: FrameChanges,
    pressed: Option<(u32, LayerId)>,
}

impl Page {
    /// Assembles the page for a viewport of the given size.
    #[must_use]
    pub fn new(config: PageConfig, viewport: Size) -> Self {
        let mut store = LayerStore::new();
        let screen = Rect::from_origin_size(Point::ORIGIN, viewport);

        let background = store.create_layer();
        store.set_bounds(background, screen);

        let wrapper = store.create_layer();
        store.set_bounds(wrapper, screen);
        store.set_pointer_policy(wrapper, PointerPolicy::PassThrough);

        let mut regions = [None; 5];
        for region in [Region::Hero, Region::Showcase, Region::Navigation] {
            let id = store.create_layer();
            store.add_child(wrapper, id);
            regions[region.slot()] = Some(id);
        }

        let banner = config.banner.clone().map(|props| {
            let layer = store.create_layer();
            store.add_child(wrapper, layer);
            store.set_hidden(layer, true);
            let dismiss = store.create_layer();
            store.add_child(layer, dismiss);
            regions[Region::Banner.slot()] = Some(layer);
            regions[Region::BannerDismiss.slot()] = Some(dismiss);
            MountedBanner {
                gate: DismissalGate::mount(props.storage_key.as_str()),
                props,
            }
        });

        let mut router = PointerRouter::new();
        router.set_background(background);

        let pending = store.evaluate();
        Self {
            config,
            viewport,
            store,
            router,
            background,
            wrapper,
            regions,
            banner,
            pending,
            pressed: None,
        }
    }

    /// Returns the configuration the page was built from.
    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Returns the banner's inputs, if the page has a banner.
    #[must_use]
    pub fn banner(&self) -> Option<&BannerProps> {
        self.banner.as_ref().map(|b| &b.props)
    }

    /// Returns the current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Returns the layer store, for presenters.
    #[must_use]
    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    /// Returns the layer playing `role`, if the page has one.
    #[must_use]
    pub fn layer(&self, role: LayerRole) -> Option<LayerId> {
        match role {
            LayerRole::Background => Some(self.background),
            LayerRole::ContentWrapper => Some(self.wrapper),
            LayerRole::Region(region) => self.regions[region.slot()],
        }
    }

    /// Returns the role of `layer`, or `None` if it is not part of this page.
    #[must_use]
    pub fn role_of(&self, layer: LayerId) -> Option<LayerRole> {
        if layer == self.background {
            return Some(LayerRole::Background);
        }
        if layer == self.wrapper {
            return Some(LayerRole::ContentWrapper);
        }
        Region::ALL
            .into_iter()
            .find(|r| self.regions[r.slot()] == Some(layer))
            .map(LayerRole::Region)
    }

    /// Returns whether the banner is on screen. Pages without a banner
    /// report [`Hidden`](BannerViewState::Hidden).
    #[must_use]
    pub fn banner_state(&self) -> BannerViewState {
        self.banner
            .as_ref()
            .map_or(BannerViewState::Hidden, |b| b.gate.state())
    }

    /// Registers a pointer handler for the layer playing `role`. Returns
    /// `false` if the page has no such layer.
    pub fn on_pointer(&mut self, role: LayerRole, handler: impl PointerHandler + 'static) -> bool {
        let Some(layer) = self.layer(role) else {
            return false;
        };
        self.router.set_handler(layer, handler);
        true
    }

    /// Consults the persisted dismissal record and reveals the banner unless
    /// it was dismissed. Call once the first frame has been painted; later
    /// calls do nothing.
    pub fn settle(&mut self, store: &dyn KeyValueStore, tracer: &mut Tracer<'_>) -> BannerViewState {
        let Some(banner) = &mut self.banner else {
            return BannerViewState::Hidden;
        };
        let settled = banner.gate.settle(store);
        if !settled.checked {
            return settled.state;
        }
        if let Some(error) = &settled.read_error {
            tracer.store_fault(&StoreFaultEvent {
                key: banner.gate.key(),
                op: StoreOp::Read,
                error,
            });
        }
        tracer.banner_settled(&BannerSettledEvent {
            key: banner.gate.key(),
            state: settled.state,
        });
        if let Some(layer) = self.regions[Region::Banner.slot()] {
            self.store.set_hidden(layer, !settled.state.is_visible());
            self.refresh();
        }
        settled.state
    }

    /// Hides the banner and persists the dismissal. Returns `None` if the
    /// page has no banner.
    pub fn dismiss_banner(
        &mut self,
        store: &mut dyn KeyValueStore,
        tracer: &mut Tracer<'_>,
    ) -> Option<Dismissed> {
        let banner = self.banner.as_mut()?;
        let dismissed = banner.gate.dismiss(store);
        if let Some(error) = &dismissed.write_error {
            tracer.store_fault(&StoreFaultEvent {
                key: banner.gate.key(),
                op: StoreOp::Write,
                error,
            });
        }
        tracer.banner_dismissed(&BannerDismissedEvent {
            key: banner.gate.key(),
            was_visible: dismissed.was_visible,
            persisted: dismissed.persisted(),
        });
        if let Some(layer) = self.regions[Region::Banner.slot()] {
            self.store.set_hidden(layer, true);
            self.refresh();
        }
        Some(dismissed)
    }

    /// Routes a pointer event to exactly one layer.
    ///
    /// Returns `None` for positions outside the viewport.
    pub fn pointer(
        &mut self,
        event: PointerEvent,
        store: &mut dyn KeyValueStore,
        tracer: &mut Tracer<'_>,
    ) -> Option<Routed> {
        let dispatch = self.router.route(&self.store, &event)?;
        let role = self.role_of(dispatch.target)?;
        tracer.pointer_routed(&PointerRoutedEvent {
            kind: event.kind,
            position: event.position,
            target: dispatch.target,
            role,
        });

        let on_dismiss = role == LayerRole::Region(Region::BannerDismiss);
        let mut dismissed = false;
        match event.kind {
            PointerKind::Down => {
                self.pressed = on_dismiss.then_some((event.pointer_id, dispatch.target));
            }
            PointerKind::Up => {
                let clicked = self.pressed.take() == Some((event.pointer_id, dispatch.target));
                if clicked && on_dismiss {
                    dismissed = self.dismiss_banner(store, tracer).is_some();
                }
            }
            PointerKind::Leave => self.pressed = None,
            PointerKind::Move => {}
        }

        Some(Routed {
            target: dispatch.target,
            role,
            local: dispatch.local,
            handled: dispatch.handled,
            dismissed,
        })
    }

    /// Resizes the background and content wrapper to a new viewport.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        let screen = Rect::from_origin_size(Point::ORIGIN, viewport);
        self.store.set_bounds(self.background, screen);
        self.store.set_bounds(self.wrapper, screen);
        self.refresh();
    }

    /// Records the measured bounds of `region`, relative to its parent: the
    /// content wrapper for top-level regions, the banner for its dismiss
    /// control.
    ///
    /// Returns `false` if the page has no such region.
    pub fn set_region_bounds(&mut self, region: Region, bounds: Rect, tracer: &mut Tracer<'_>) -> bool {
        let Some(layer) = self.regions[region.slot()] else {
            return false;
        };
        if self.store.bounds(layer) == bounds {
            return true;
        }
        self.store.set_bounds(layer, bounds);
        self.refresh();
        tracer.region_measured(&RegionMeasuredEvent { region, bounds });
        true
    }

    /// Returns every change since the previous call, for the presenter.
    pub fn evaluate(&mut self) -> FrameChanges {
        self.refresh();
        core::mem::take(&mut self.pending)
    }

    /// Checks that every viewport position resolves to exactly one handler.
    ///
    /// Fails with [`StackError::UnreachablePassThrough`] until at least one
    /// region has been measured.
    ///
    /// # Errors
    ///
    /// Returns the first [`StackError`] found.
    pub fn validate(&self) -> Result<LayerId, StackError> {
        self.store.validate_stack(self.viewport)
    }

    fn refresh(&mut self) {
        let changes = self.store.evaluate();
        self.pending.absorb(changes);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use core::cell::Cell;

    use super::*;
    use crate::dismissal::DISMISSED_VALUE;
    use crate::storage::{MemoryStore, StoreError};

    const VIEWPORT: Size = Size::new(800.0, 600.0);
    const DISMISS_POINT: Point = Point::new(770.0, 30.0);

    struct ThrowingStore;

    impl KeyValueStore for ThrowingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Rejected("SecurityError".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn config() -> PageConfig {
        PageConfig::neurobits()
            .with_banner(BannerProps::new("X").with_storage_key("magic-update-banner"))
    }

    /// A page with every region measured: nav across the top, the banner
    /// over it, hero and showcase below.
    fn measured(config: PageConfig) -> Page {
        let mut page = Page::new(config, VIEWPORT);
        let mut tracer = Tracer::none();
        page.set_region_bounds(Region::Navigation, Rect::new(100.0, 20.0, 700.0, 80.0), &mut tracer);
        page.set_region_bounds(Region::Hero, Rect::new(100.0, 120.0, 700.0, 260.0), &mut tracer);
        page.set_region_bounds(Region::Showcase, Rect::new(0.0, 300.0, 800.0, 520.0), &mut tracer);
        page.set_region_bounds(Region::Banner, Rect::new(0.0, 0.0, 800.0, 60.0), &mut tracer);
        page.set_region_bounds(Region::BannerDismiss, Rect::new(760.0, 14.0, 792.0, 46.0), &mut tracer);
        page
    }

    fn click(page: &mut Page, at: Point, store: &mut dyn KeyValueStore) -> Option<Routed> {
        let mut tracer = Tracer::none();
        page.pointer(PointerEvent::down(at), store, &mut tracer);
        page.pointer(PointerEvent::up(at), store, &mut tracer)
    }

    #[test]
    fn stack_is_built_bottom_to_top() {
        let page = Page::new(config(), VIEWPORT);
        let z = |role| page.store().z_index(page.layer(role).unwrap());
        assert_eq!(z(LayerRole::Background), 0);
        assert!(z(LayerRole::ContentWrapper) < z(LayerRole::Region(Region::Hero)));
        assert!(z(LayerRole::Region(Region::Hero)) < z(LayerRole::Region(Region::Showcase)));
        assert!(z(LayerRole::Region(Region::Showcase)) < z(LayerRole::Region(Region::Navigation)));
        assert!(z(LayerRole::Region(Region::Navigation)) < z(LayerRole::Region(Region::Banner)));
        assert!(z(LayerRole::Region(Region::Banner)) < z(LayerRole::Region(Region::BannerDismiss)));

        let wrapper = page.layer(LayerRole::ContentWrapper).unwrap();
        assert_eq!(page.store().pointer_policy(wrapper), PointerPolicy::PassThrough);
    }

    #[test]
    fn roles_round_trip_through_layers() {
        let page = Page::new(config(), VIEWPORT);
        for region in Region::ALL {
            let role = LayerRole::Region(region);
            assert_eq!(page.role_of(page.layer(role).unwrap()), Some(role));
        }
        assert_eq!(
            page.role_of(page.layer(LayerRole::Background).unwrap()),
            Some(LayerRole::Background)
        );
    }

    #[test]
    fn page_without_banner_has_no_banner_layers() {
        let mut page = Page::new(PageConfig::neurobits(), VIEWPORT);
        assert!(page.layer(LayerRole::Region(Region::Banner)).is_none());
        assert!(page.banner().is_none());
        assert_eq!(page.settle(&MemoryStore::new(), &mut Tracer::none()), BannerViewState::Hidden);
        assert!(page.dismiss_banner(&mut MemoryStore::new(), &mut Tracer::none()).is_none());
        assert!(!page.set_region_bounds(Region::Banner, Rect::ZERO, &mut Tracer::none()));
    }

    #[test]
    fn banner_is_hidden_until_settled() {
        let page = measured(config());
        let banner = page.layer(LayerRole::Region(Region::Banner)).unwrap();
        assert_eq!(page.banner_state(), BannerViewState::Hidden);
        assert!(page.store().effective_hidden(banner));
        // The dismiss control cannot be hit before the check resolves.
        assert_eq!(
            page.store().hit_test(DISMISS_POINT),
            page.layer(LayerRole::Background)
        );
    }

    #[test]
    fn unmeasured_page_fails_validation() {
        let page = Page::new(config(), VIEWPORT);
        assert_eq!(
            page.validate(),
            Err(StackError::UnreachablePassThrough(
                page.layer(LayerRole::ContentWrapper).unwrap()
            ))
        );
    }

    #[test]
    fn measured_page_validates() {
        let mut page = measured(config());
        assert_eq!(page.validate(), Ok(page.layer(LayerRole::Background).unwrap()));
        page.settle(&MemoryStore::new(), &mut Tracer::none());
        assert_eq!(page.validate(), Ok(page.layer(LayerRole::Background).unwrap()));
    }

    #[test]
    fn region_pointer_never_reaches_background() {
        let mut page = measured(config());
        let background_hits = Rc::new(Cell::new(0));
        let hero_hits = Rc::new(Cell::new(0));
        {
            let hits = background_hits.clone();
            page.on_pointer(LayerRole::Background, move |_: &PointerEvent, _: Point| {
                hits.set(hits.get() + 1);
            });
            let hits = hero_hits.clone();
            page.on_pointer(LayerRole::Region(Region::Hero), move |_: &PointerEvent, _: Point| {
                hits.set(hits.get() + 1);
            });
        }
        let mut store = MemoryStore::new();

        let routed = click(&mut page, Point::new(200.0, 200.0), &mut store).unwrap();
        assert_eq!(routed.role, LayerRole::Region(Region::Hero));
        assert_eq!(routed.local, Point::new(100.0, 80.0));
        assert_eq!((hero_hits.get(), background_hits.get()), (2, 0));

        let routed = click(&mut page, Point::new(50.0, 280.0), &mut store).unwrap();
        assert_eq!(routed.role, LayerRole::Background);
        assert_eq!((hero_hits.get(), background_hits.get()), (2, 2));
    }

    #[test]
    fn zero_size_region_falls_through() {
        let mut page = measured(config());
        page.set_region_bounds(Region::Hero, Rect::new(100.0, 120.0, 100.0, 260.0), &mut Tracer::none());
        let routed = click(&mut page, Point::new(100.0, 200.0), &mut MemoryStore::new()).unwrap();
        assert_eq!(routed.role, LayerRole::Background);
    }

    #[test]
    fn clicking_dismiss_hides_and_persists() {
        let mut page = measured(config());
        let mut store = MemoryStore::new();

        assert_eq!(page.settle(&store, &mut Tracer::none()), BannerViewState::Visible);
        assert_eq!(page.banner().unwrap().message, "X");

        let routed = click(&mut page, DISMISS_POINT, &mut store).unwrap();
        assert_eq!(routed.role, LayerRole::Region(Region::BannerDismiss));
        assert!(routed.dismissed);
        assert_eq!(page.banner_state(), BannerViewState::Hidden);
        assert_eq!(
            store.get("magic-update-banner"),
            Ok(Some(DISMISSED_VALUE.to_string()))
        );

        // The spot the control occupied now belongs to what lies beneath.
        let routed = click(&mut page, DISMISS_POINT, &mut store).unwrap();
        assert_eq!(routed.role, LayerRole::Background);
        let routed = click(&mut page, Point::new(150.0, 30.0), &mut store).unwrap();
        assert_eq!(routed.role, LayerRole::Region(Region::Navigation));
    }

    #[test]
    fn banner_body_is_not_a_dismiss_control() {
        let mut page = measured(config());
        let mut store = MemoryStore::new();
        page.settle(&store, &mut Tracer::none());

        let routed = click(&mut page, Point::new(150.0, 30.0), &mut store).unwrap();
        assert_eq!(routed.role, LayerRole::Region(Region::Banner));
        assert!(!routed.dismissed);
        assert!(store.is_empty());
    }

    #[test]
    fn press_and_release_must_both_hit_dismiss() {
        let mut page = measured(config());
        let mut store = MemoryStore::new();
        let mut tracer = Tracer::none();
        page.settle(&store, &mut tracer);

        page.pointer(PointerEvent::down(DISMISS_POINT), &mut store, &mut tracer);
        let routed = page
            .pointer(PointerEvent::up(Point::new(400.0, 30.0)), &mut store, &mut tracer)
            .unwrap();
        assert!(!routed.dismissed);

        page.pointer(PointerEvent::down(Point::new(400.0, 30.0)), &mut store, &mut tracer);
        let routed = page
            .pointer(PointerEvent::up(DISMISS_POINT), &mut store, &mut tracer)
            .unwrap();
        assert!(!routed.dismissed);
        assert_eq!(page.banner_state(), BannerViewState::Visible);
    }

    #[test]
    fn different_pointer_release_is_not_a_click() {
        let mut page = measured(config());
        let mut store = MemoryStore::new();
        let mut tracer = Tracer::none();
        page.settle(&store, &mut tracer);

        page.pointer(PointerEvent::down(DISMISS_POINT), &mut store, &mut tracer);
        let routed = page
            .pointer(PointerEvent::up(DISMISS_POINT).with_pointer_id(3), &mut store, &mut tracer)
            .unwrap();
        assert!(!routed.dismissed);
    }

    #[test]
    fn prepopulated_storage_never_shows_banner() {
        let mut page = measured(config());
        let mut store = MemoryStore::with_entries([("magic-update-banner", "true")]);
        assert_eq!(page.settle(&store, &mut Tracer::none()), BannerViewState::Hidden);

        let routed = click(&mut page, DISMISS_POINT, &mut store).unwrap();
        assert_eq!(routed.role, LayerRole::Background);
        assert_eq!(page.banner_state(), BannerViewState::Hidden);
    }

    #[test]
    fn throwing_storage_shows_banner_and_dismisses_locally() {
        let mut page = measured(config());
        assert_eq!(page.settle(&ThrowingStore, &mut Tracer::none()), BannerViewState::Visible);

        let routed = click(&mut page, DISMISS_POINT, &mut ThrowingStore).unwrap();
        assert!(routed.dismissed);
        assert_eq!(page.banner_state(), BannerViewState::Hidden);
    }

    #[test]
    fn resize_tracks_viewport() {
        let mut page = measured(config());
        page.resize(Size::new(1200.0, 900.0));
        let background = page.layer(LayerRole::Background).unwrap();
        assert_eq!(page.store().world_bounds(background), Rect::new(0.0, 0.0, 1200.0, 900.0));
        assert_eq!(page.validate(), Ok(background));
        let routed = click(&mut page, Point::new(1100.0, 850.0), &mut MemoryStore::new()).unwrap();
        assert_eq!(routed.role, LayerRole::Background);
    }

    #[test]
    fn leave_reaches_background() {
        let mut page = measured(config());
        let routed = page
            .pointer(PointerEvent::leave(), &mut MemoryStore::new(), &mut Tracer::none())
            .unwrap();
        assert_eq!(routed.role, LayerRole::Background);
    }

    #[test]
    fn evaluate_hands_out_accumulated_changes_once() {
        let mut page = Page::new(config(), VIEWPORT);
        let first = page.evaluate();
        assert_eq!(first.added.len(), 7);
        assert!(first.topology_changed);

        page.set_region_bounds(Region::Hero, Rect::new(0.0, 0.0, 10.0, 10.0), &mut Tracer::none());
        page.settle(&MemoryStore::new(), &mut Tracer::none());
        let second = page.evaluate();
        let banner = page.layer(LayerRole::Region(Region::Banner)).unwrap();
        assert!(second.unhidden.contains(&banner.index()));
        assert!(second.added.is_empty());

        assert!(page.evaluate().is_empty());
    }

    #[test]
    fn unchanged_bounds_are_not_re_measured() {
        let mut page = measured(config());
        let _ = page.evaluate();
        page.set_region_bounds(Region::Hero, Rect::new(100.0, 120.0, 700.0, 260.0), &mut Tracer::none());
        assert!(page.evaluate().is_empty());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn storage_faults_reach_the_tracer() {
        use alloc::vec::Vec;

        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Faults(Vec<StoreOp>, Vec<bool>);
        impl TraceSink for Faults {
            fn on_store_fault(&mut self, e: &StoreFaultEvent<'_>) {
                self.0.push(e.op);
            }
            fn on_banner_dismissed(&mut self, e: &BannerDismissedEvent<'_>) {
                self.1.push(e.persisted);
            }
        }

        let mut page = measured(config());
        let mut sink = Faults::default();
        let mut tracer = Tracer::new(&mut sink);
        page.settle(&ThrowingStore, &mut tracer);
        page.dismiss_banner(&mut ThrowingStore, &mut tracer);
        drop(tracer);
        assert_eq!(sink.0, &[StoreOp::Read, StoreOp::Write]);
        assert_eq!(sink.1, &[false]);
    }
}
