// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for strata.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomPresenter`]: mirrors layer stacking, visibility, and pointer policy
//!   into DOM elements
//! - [`LocalStorage`]: `localStorage` as a
//!   [`KeyValueStore`](strata_core::storage::KeyValueStore)
//! - [`PointerInput`]: DOM pointer listeners producing
//!   [`PointerEvent`](strata_core::pointer::PointerEvent)s
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`layout`]: measuring elements into layer bounds

#![no_std]

extern crate alloc;

mod input;
pub mod layout;
mod presenter;
mod raf;
mod storage;

pub use input::{PointerInput, pointer_kind};
pub use presenter::{DomPresenter, pointer_events_css};
pub use raf::{AnimationFrame, RafLoop};
pub use storage::LocalStorage;
pub use strata_core::backend::Presenter;
