// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer stacking, pointer routing, and persisted banner dismissal for
//! layered landing pages.
//!
//! `strata_core` models a page as a tree of layers drawn bottom to top: an
//! interactive background that must see the pointer everywhere, a
//! pass-through content wrapper, and the interactive regions that sit inside
//! it. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   PageConfig ──► Page::new() ──► LayerStore (background, wrapper, regions)
//!                                      │
//!        host measures regions ────────┤ set_region_bounds()
//!                                      ▼
//!   LayerStore::evaluate() ──► FrameChanges ──► Presenter::apply()
//!
//!   first frame ──► Page::settle(store) ──► DismissalGate ──► banner shown?
//!
//!   PointerEvent ──► Page::pointer() ──► hit_test() ──► exactly one target
//!                                                     (region or background)
//! ```
//!
//! **[`layer`]**: Struct-of-arrays layer tree with generational handles,
//! evaluation of world bounds and effective visibility, hit testing, and
//! stack validation.
//!
//! **[`dirty`]**: Multi-channel dirty tracking via `understory_dirty`.
//!
//! **[`pointer`]**: Pointer events and the per-layer handler registry that
//! resolves each event to exactly one handler.
//!
//! **[`dismissal`]**: The persisted dismissal state machine that decides
//! whether a one-time banner is shown.
//!
//! **[`storage`]**: The [`KeyValueStore`](storage::KeyValueStore) capability
//! the dismissal machine persists through, plus an in-memory implementation.
//!
//! **[`config`]**: Configuration bundles handed to the page and to its
//! external widgets.
//!
//! **[`page`]**: Assembles the standard landing page stack from a
//! [`PageConfig`](config::PageConfig) and coordinates the two mechanisms.
//!
//! **[`backend`]**: Traits that platform backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `serde` (disabled by default): Derives `Serialize`/`Deserialize` for the
//!   configuration types.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod dirty;
pub mod dismissal;
pub mod layer;
pub mod page;
pub mod pointer;
pub mod storage;
pub mod trace;
