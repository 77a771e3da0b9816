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

//! Frame pixel-format conversion
//!
//! Converts the console framebuffer into the presentation surface's native
//! formats, streaming through the port in 32-byte bursts (eight 32-bit
//! words, sixteen output pixels per burst in 15bpp mode).
//!
//! The console stores 15bpp pixels as BGR555 and 24bpp pixels as packed
//! byte triples; the surface wants ARGB1555 or RGB565 rows at a fixed
//! 1024-pixel pitch. Widths are processed in whole 16-pixel bursts, which
//! every console display mode satisfies.

use crate::core::gpu::{PvrPort, TaRecord};

use super::TEX_WIDTH;

/// Truncate an 8-bit-per-channel color to RGB565.
#[inline]
fn rgb_24_to_16(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r) & 0xF8) << 8 | (u16::from(g) & 0xFC) << 3 | u16::from(b) >> 3
}

/// Copy a 15bpp frame region into the surface, swapping BGR555 to RGB555.
///
/// `vram` holds two pixels per word; `stride` and `w` are in pixels. Both
/// channels of a word pair swap in one pass over the packed word.
pub(super) fn copy15<P: PvrPort + ?Sized>(
    port: &mut P,
    vram: &[u32],
    stride: usize,
    w: usize,
    h: usize,
) {
    let mut src = 0;
    let mut dest = 0;

    for _ in 0..h {
        let mut line = dest;

        for _ in (0..w).step_by(16) {
            let mut burst: TaRecord = [0; 8];
            for word in burst.iter_mut() {
                let pixels = vram[src];
                src += 1;

                let b = (pixels >> 10) & 0x001F_001F;
                let g = pixels & 0x03E0_03E0;
                let r = (pixels & 0x001F_001F) << 10;

                *word = r | g | b;
            }

            port.store(line, &burst);
            line += 8;
        }

        src += (stride - w) / 2;
        dest += TEX_WIDTH / 2;
    }
}

/// Copy a 24bpp frame region into the surface as RGB565.
///
/// Input rows pack four pixels into every three words; `stride` stays in
/// 16-bit units, so a row occupies `stride * 2` bytes of which `w * 3` are
/// pixel data.
pub(super) fn copy24<P: PvrPort + ?Sized>(
    port: &mut P,
    vram: &[u32],
    stride: usize,
    w: usize,
    h: usize,
) {
    let mut src = 0;
    let mut dest = 0;

    for _ in 0..h {
        let mut line = dest;

        for _ in (0..w).step_by(16) {
            let mut burst: TaRecord = [0; 8];
            for i in (0..8).step_by(2) {
                let w0 = vram[src]; // B G R B
                let w1 = vram[src + 1]; // G R B G
                let w2 = vram[src + 2]; // R B G R
                src += 3;

                let px0 = rgb_24_to_16(w0 as u8, (w0 >> 8) as u8, (w0 >> 16) as u8);
                let px1 = rgb_24_to_16((w0 >> 24) as u8, w1 as u8, (w1 >> 8) as u8);
                burst[i] = u32::from(px1) << 16 | u32::from(px0);

                let px0 = rgb_24_to_16((w1 >> 16) as u8, (w1 >> 24) as u8, w2 as u8);
                let px1 = rgb_24_to_16((w2 >> 8) as u8, (w2 >> 16) as u8, (w2 >> 24) as u8);
                burst[i + 1] = u32::from(px1) << 16 | u32::from(px0);
            }

            port.store(line, &burst);
            line += 8;
        }

        src += (stride * 2 - w * 3) / 4;
        dest += TEX_WIDTH / 2;
    }
}
