// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events and single-target routing.
//!
//! [`PointerRouter`] keeps at most one [`PointerHandler`] per layer. Each
//! event is resolved with [`LayerStore::hit_test`] and delivered to the
//! handler of the hit layer only, so an event is never handled twice and a
//! pass-through layer never handles anything. `Leave` events carry no useful
//! position and go straight to the background, which uses them to stop
//! reacting to the cursor.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::layer::{LayerId, LayerStore};

/// What the pointer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A button was pressed.
    Down,
    /// A button was released.
    Up,
    /// The pointer moved.
    Move,
    /// The pointer left the viewport.
    Leave,
}

impl PointerKind {
    /// Short lowercase name, for log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::Move => "move",
            Self::Leave => "leave",
        }
    }
}

/// A pointer event in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Where, in viewport coordinates.
    pub position: Point,
    /// Identifies the pointer for multi-pointer devices.
    pub pointer_id: u32,
}

impl PointerEvent {
    /// Creates an event for the primary pointer.
    #[must_use]
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self {
            kind,
            position,
            pointer_id: 0,
        }
    }

    /// A primary-pointer press at `position`.
    #[must_use]
    pub const fn down(position: Point) -> Self {
        Self::new(PointerKind::Down, position)
    }

    /// A primary-pointer release at `position`.
    #[must_use]
    pub const fn up(position: Point) -> Self {
        Self::new(PointerKind::Up, position)
    }

    /// A primary-pointer move to `position`.
    #[must_use]
    pub const fn move_to(position: Point) -> Self {
        Self::new(PointerKind::Move, position)
    }

    /// The primary pointer left the viewport.
    #[must_use]
    pub const fn leave() -> Self {
        Self::new(PointerKind::Leave, Point::ORIGIN)
    }

    /// Returns the same event for a different pointer.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Receives the pointer events routed to one layer.
pub trait PointerHandler {
    /// Handles `event`. `local` is the event position relative to the
    /// layer's world origin.
    fn handle(&mut self, event: &PointerEvent, local: Point);
}

impl<F: FnMut(&PointerEvent, Point)> PointerHandler for F {
    fn handle(&mut self, event: &PointerEvent, local: Point) {
        self(event, local);
    }
}

/// Where a routed event went.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dispatch {
    /// The single layer that received the event.
    pub target: LayerId,
    /// Event position relative to the target's world origin.
    pub local: Point,
    /// Whether a handler was registered for the target.
    pub handled: bool,
}

type Slot = Option<(u32, Box<dyn PointerHandler>)>;

/// Per-layer pointer handler registry.
#[derive(Default)]
pub struct PointerRouter {
    handlers: Vec<Slot>,
    background: Option<LayerId>,
}

impl fmt::Debug for PointerRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerRouter")
            .field(
                "handlers",
                &self.handlers.iter().filter(|slot| slot.is_some()).count(),
            )
            .field("background", &self.background)
            .finish()
    }
}

impl PointerRouter {
    /// Creates a router with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `layer`, replacing any previous one.
    pub fn set_handler(&mut self, layer: LayerId, handler: impl PointerHandler + 'static) {
        let idx = layer.index() as usize;
        if idx >= self.handlers.len() {
            self.handlers.resize_with(idx + 1, || None);
        }
        self.handlers[idx] = Some((layer.generation(), Box::new(handler)));
    }

    /// Removes the handler for `layer`. Returns `true` if one was registered.
    pub fn remove_handler(&mut self, layer: LayerId) -> bool {
        if !self.has_handler(layer) {
            return false;
        }
        self.handlers[layer.index() as usize] = None;
        true
    }

    /// Returns `true` if a handler is registered for `layer`.
    #[must_use]
    pub fn has_handler(&self, layer: LayerId) -> bool {
        matches!(
            self.handlers.get(layer.index() as usize),
            Some(Some((generation, _))) if *generation == layer.generation()
        )
    }

    /// Sets the layer that receives `Leave` events.
    pub fn set_background(&mut self, layer: LayerId) {
        self.background = Some(layer);
    }

    /// Returns the layer `event` would be delivered to, without delivering
    /// it.
    #[must_use]
    pub fn resolve(&self, store: &LayerStore, event: &PointerEvent) -> Option<LayerId> {
        match event.kind {
            PointerKind::Leave => self.background.filter(|&bg| store.is_alive(bg)),
            _ => store.hit_test(event.position),
        }
    }

    /// Delivers `event` to the handler of the layer it resolves to.
    ///
    /// Returns `None` when the event lands in a dead zone (outside every
    /// capturing layer).
    pub fn route(&mut self, store: &LayerStore, event: &PointerEvent) -> Option<Dispatch> {
        let target = self.resolve(store, event)?;
        let origin = store.world_bounds(target).origin();
        let local = Point::new(event.position.x - origin.x, event.position.y - origin.y);

        let handled = match self.handlers.get_mut(target.index() as usize) {
            Some(Some((generation, handler))) if *generation == target.generation() => {
                handler.handle(event, local);
                true
            }
            _ => false,
        };
        Some(Dispatch {
            target,
            local,
            handled,
        })
    }
}
