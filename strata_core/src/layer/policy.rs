// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer policies.

/// Whether a layer intercepts pointer input inside its bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerPolicy {
    /// The layer handles pointer events that land inside its bounds.
    #[default]
    Capture,
    /// Pointer events fall through to whatever lies beneath. Descendants may
    /// still capture within their own bounds.
    PassThrough,
}

impl PointerPolicy {
    /// Returns `true` for [`Capture`](Self::Capture).
    #[inline]
    #[must_use]
    pub const fn captures(self) -> bool {
        matches!(self, Self::Capture)
    }
}
