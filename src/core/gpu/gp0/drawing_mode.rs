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

//! Drawing-environment state commands (GP0 0xE1-0xE6)
//!
//! These commands carry their payload in the opcode word itself and mutate
//! decoder state instead of emitting geometry. Each one also records its raw
//! word in the extended register image at index `opcode & 7`, where the
//! external core reads the drawing environment back.

use crate::core::gpu::{MaskSettings, PacketBuffer, PvrPort, Renderer};

/// Sign-extend an 11-bit field to i16.
#[inline]
fn sext11(value: u32) -> i16 {
    (((value & 0x7FF) as i16) << 5) >> 5
}

impl<P: PvrPort> Renderer<P> {
    /// GP0(0xE1): set the texture page.
    ///
    /// The low 11 bits of the word replace the low 11 bits of the status
    /// word; everything above is preserved for the external core.
    pub(in crate::core::gpu) fn cmd_texture_page(&mut self, packet: &PacketBuffer) {
        let word = packet.word(0);
        self.gp1 = (self.gp1 & !0x7FF) | (word & 0x7FF);
        self.ex_regs[1] = word;
    }

    /// GP0(0xE2): set the texture window.
    ///
    /// Recorded but not applied. Texture sampling is not implemented, so
    /// the window has nothing to clamp yet.
    pub(in crate::core::gpu) fn cmd_texture_window(&mut self, packet: &PacketBuffer) {
        self.ex_regs[2] = packet.word(0);
        log::debug!("texture window 0x{:06X} (not applied)", packet.word(0) & 0xFF_FFFF);
    }

    /// GP0(0xE3): set the drawing-area top-left corner.
    pub(in crate::core::gpu) fn cmd_draw_area_top_left(&mut self, packet: &PacketBuffer) {
        let word = packet.word(0);
        self.draw_area.x1 = (word & 0x3FF) as u16;
        self.draw_area.y1 = ((word >> 10) & 0x1FF) as u16;
        self.ex_regs[3] = word;
        log::debug!(
            "drawing area top-left ({}, {})",
            self.draw_area.x1,
            self.draw_area.y1
        );
    }

    /// GP0(0xE4): set the drawing-area bottom-right corner.
    pub(in crate::core::gpu) fn cmd_draw_area_bottom_right(&mut self, packet: &PacketBuffer) {
        let word = packet.word(0);
        self.draw_area.x2 = (word & 0x3FF) as u16;
        self.draw_area.y2 = ((word >> 10) & 0x1FF) as u16;
        self.ex_regs[4] = word;
        log::debug!(
            "drawing area bottom-right ({}, {})",
            self.draw_area.x2,
            self.draw_area.y2
        );
    }

    /// GP0(0xE5): set the drawing offset.
    ///
    /// Two signed 11-bit fields, X in bits 0-10 and Y in bits 11-21.
    pub(in crate::core::gpu) fn cmd_draw_offset(&mut self, packet: &PacketBuffer) {
        let word = packet.word(0);
        self.draw_offset = (sext11(word), sext11(word >> 11));
        self.ex_regs[5] = word;
        log::debug!(
            "drawing offset ({}, {})",
            self.draw_offset.0,
            self.draw_offset.1
        );
    }

    /// GP0(0xE6): set the VRAM mask bits.
    ///
    /// Stored for readback only. The rasterizer keeps no per-pixel mask
    /// bit, so neither setting affects drawing.
    pub(in crate::core::gpu) fn cmd_mask_settings(&mut self, packet: &PacketBuffer) {
        let word = packet.word(0);
        self.mask = MaskSettings::from_bits_truncate(word & 0x3);
        self.ex_regs[6] = word;
    }
}
