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

//! Line commands (GP0 0x40, 0x50)
//!
//! The rasterizer has no line primitive, so each segment becomes a
//! one-pixel-thick quad built from six strip vertices. Endpoints are
//! ordered left-to-right before expansion so the expansion pattern only
//! has to distinguish upward from downward segments.

use crate::core::gpu::{PacketBuffer, PvrPort, Renderer};
use crate::core::timing::{self, CycleTally};

impl<P: PvrPort> Renderer<P> {
    /// Render a monochrome (0x40) or shaded (0x50) line segment.
    ///
    /// Chained poly-lines (0x48 onward) do not reach this handler; they are
    /// consumed and logged by the dispatcher.
    pub(in crate::core::gpu) fn cmd_line(
        &mut self,
        op: u8,
        packet: &PacketBuffer,
        tally: &mut CycleTally,
    ) {
        let multicolor = op & 0x10 != 0;

        self.push_header();

        let argb0 = packet.color(0).to_argb();
        let v0 = packet.vertex(1);
        let (argb1, v1) = if multicolor {
            (packet.color(2).to_argb(), packet.vertex(3))
        } else {
            (argb0, packet.vertex(2))
        };

        if v0.x > v1.x {
            self.draw_line(v1.x, v1.y, argb1, v0.x, v0.y, argb0);
        } else {
            self.draw_line(v0.x, v0.y, argb0, v1.x, v1.y, argb1);
        }

        let dx = (i32::from(v1.x) - i32::from(v0.x)).unsigned_abs();
        let dy = (i32::from(v1.y) - i32::from(v0.y)).unsigned_abs();
        tally.charge(timing::line(dx.max(dy)));
    }

    /// Expand one left-to-right segment into a six-vertex thin quad.
    ///
    /// The widening row (+1 in x and y) goes below a downward segment and
    /// above an upward one, so diagonal joints stay solid either way.
    fn draw_line(&mut self, x0: i16, y0: i16, argb0: u32, x1: i16, y1: i16, argb1: u32) {
        let up = i16::from(y1 < y0);
        let down = 1 - up;

        let xs = [
            x0,
            x0,
            x0.wrapping_add(1),
            x1,
            x1.wrapping_add(1),
            x1.wrapping_add(1),
        ];
        let ys = [
            y0.wrapping_add(up),
            y0.wrapping_add(down),
            y0.wrapping_add(up),
            y1.wrapping_add(down),
            y1.wrapping_add(up),
            y1.wrapping_add(down),
        ];

        for i in 0..6 {
            let argb = if i < 3 { argb0 } else { argb1 };
            self.push_vertex(xs[i], ys[i], argb, i == 5);
        }
    }
}
