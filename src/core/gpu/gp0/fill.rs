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

//! VRAM fill command (GP0 0x02)

use crate::core::gpu::{PacketBuffer, PvrPort, Renderer};
use crate::core::timing::{self, CycleTally};

impl<P: PvrPort> Renderer<P> {
    /// GP0(0x02): fill a VRAM rectangle with a solid color.
    ///
    /// The VRAM copy itself lives with the external core; this side only
    /// normalizes the rectangle and charges the fill's cycle cost. Width
    /// and height wrap modulo 1024x512, a zero size meaning the full
    /// extent. The horizontal position and size operate in 16-pixel
    /// blocks.
    pub(in crate::core::gpu) fn cmd_fill_rect(&mut self, packet: &PacketBuffer, tally: &mut CycleTally) {
        let color = packet.color(0);
        let raw_w = u32::from(packet.half(4) & 0x3FF);
        let raw_h = u32::from(packet.half(5) & 0x1FF);

        let x = u32::from(packet.half(2) & 0x3FF);
        let y = u32::from(packet.half(3) & 0x1FF);
        let w = ((raw_w.wrapping_sub(1) & 0x3FF) + 1 + 0xE) & !0xF;
        let h = (raw_h.wrapping_sub(1) & 0x1FF) + 1;
        let x = (x + 0xE) & !0xF;

        log::debug!("fill 0x{:06X} at ({x}, {y}) size {w}x{h}", color.to_argb());

        // TODO: invalidate any cached texture blocks overlapping the filled
        // rectangle once VRAM-sourced textures are rendered

        tally.charge(timing::fill(raw_w, raw_h));
    }
}
