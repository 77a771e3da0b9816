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

//! Untextured polygon commands (GP0 0x20, 0x28, 0x30, 0x38)
//!
//! Opcode bit 3 selects quad over triangle, bit 4 selects per-vertex
//! (gouraud) colors over a single flat color. The vertex order of a quad
//! already matches the accelerator's strip order, so both shapes submit as
//! one strip with the end-of-list flag on the final vertex.

use crate::core::gpu::{PacketBuffer, PvrPort, Renderer};
use crate::core::timing::{self, CycleTally};

impl<P: PvrPort> Renderer<P> {
    /// Render a flat or gouraud untextured triangle or quad.
    ///
    /// Flat commands carry one color word then all vertices; gouraud
    /// commands interleave a color word before every vertex, the first
    /// color sharing the opcode word.
    pub(in crate::core::gpu) fn cmd_polygon(
        &mut self,
        op: u8,
        packet: &PacketBuffer,
        tally: &mut CycleTally,
    ) {
        let multicolor = op & 0x10 != 0;
        let quad = op & 0x08 != 0;
        let count = if quad { 4 } else { 3 };

        self.push_header();

        let mut pos = 0;
        let mut argb = 0;
        for i in 0..count {
            if i == 0 || multicolor {
                argb = packet.color(pos).to_argb();
                pos += 1;
            }
            let v = packet.vertex(pos);
            pos += 1;
            self.push_vertex(v.x, v.y, argb, i == count - 1);
        }

        tally.charge(match (quad, multicolor) {
            (false, false) => timing::poly_base(),
            (false, true) => timing::poly_base_gouraud(),
            (true, false) => timing::quad_base(),
            (true, true) => timing::quad_base_gouraud(),
        });
    }
}
