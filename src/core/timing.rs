// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Primitive cycle-cost model
//!
//! The emulated CPU core budgets its GPU DMA transfers in CPU cycles. Every
//! primitive the decoder processes charges an estimated cost so the core can
//! keep its cycle accounting roughly in line with real hardware. The
//! estimates follow the shape of the original GPU's rasterizer costs: a
//! fixed setup charge per primitive plus per-scanline and per-pixel terms.
//!
//! The costs are estimates, not measurements of the PowerVR backend; they
//! model the *console's* GPU, because that is what the core's timing tables
//! expect.

/// Running cycle account for one decode client.
///
/// `sum` accumulates across decode passes, `last` tracks cycles charged
/// since the caller last synchronized. Both are updated together by
/// [`CycleTally::charge`]; the caller resets `last` at its own sync points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleTally {
    /// Total cycles charged since this tally was created
    pub sum: u32,
    /// Cycles charged since the caller's last sync point
    pub last: u32,
}

impl CycleTally {
    /// Create a tally that resumes from a previous `last` value.
    pub fn resume(last: u32) -> Self {
        Self { sum: 0, last }
    }

    /// Charge `cost` cycles to both counters.
    #[inline]
    pub fn charge(&mut self, cost: u32) {
        self.sum = self.sum.wrapping_add(cost);
        self.last = self.last.wrapping_add(cost);
    }
}

/// Cost of a VRAM fill of `w` x `h` pixels.
///
/// Fills run in 16-pixel horizontal blocks, so the per-scanline term scales
/// with `w / 16`.
#[inline]
pub fn fill(w: u32, h: u32) -> u32 {
    23 + (4 + w / 16) * h
}

/// Base setup cost of a flat-shaded triangle.
#[inline]
pub fn poly_base() -> u32 {
    23
}

/// Base setup cost of a gouraud-shaded triangle.
#[inline]
pub fn poly_base_gouraud() -> u32 {
    poly_base() + 36
}

/// Base setup cost of a flat-shaded quad.
#[inline]
pub fn quad_base() -> u32 {
    28
}

/// Base setup cost of a gouraud-shaded quad.
#[inline]
pub fn quad_base_gouraud() -> u32 {
    quad_base() + 110
}

/// Cost of a line of major-axis length `k`.
#[inline]
pub fn line(k: u32) -> u32 {
    8 + k
}

/// Cost of an axis-aligned `w` x `h` sprite/rectangle.
#[inline]
pub fn sprite(w: u32, h: u32) -> u32 {
    h * (5 + w / 8)
}
