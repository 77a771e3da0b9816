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

//! Rectangle command (GP0 0x60)

use crate::core::gpu::{PacketBuffer, PvrPort, Renderer};
use crate::core::timing::{self, CycleTally};

impl<P: PvrPort> Renderer<P> {
    /// GP0(0x60): render a monochrome rectangle.
    ///
    /// The command carries the top-left corner and a signed size; the
    /// opposite corner is their wrapping sum. Submitted as a four-vertex
    /// strip walking x fastest.
    pub(in crate::core::gpu) fn cmd_rect(&mut self, packet: &PacketBuffer, tally: &mut CycleTally) {
        self.push_header();

        let argb = packet.color(0).to_argb();
        let origin = packet.vertex(1);
        let size = packet.vertex(2);

        let x = [origin.x, origin.x.wrapping_add(size.x)];
        let y = [origin.y, origin.y.wrapping_add(size.y)];

        for i in 0..4 {
            self.push_vertex(x[i & 1], y[(i >> 1) & 1], argb, i == 3);
        }

        let w = u32::from(packet.half(4) & 0x3FF);
        let h = u32::from(packet.half(5) & 0x1FF);
        tally.charge(timing::sprite(w, h));
    }
}
