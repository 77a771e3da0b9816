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

//! GPU decoder type definitions
//!
//! This module contains the types shared by the command-list decoder:
//! colors, vertices, the drawing area, mask settings, the bounded command
//! scratch buffer, and the display scale pair.

use bitflags::bitflags;

/// A 24-bit RGB color carried in a GP0 command word
///
/// Command words store the color in B,G,R byte order with the opcode (or a
/// pad byte) on top. The PowerVR wants packed `0x00RRGGBB`, so decoding is a
/// byte swap followed by an 8-bit right shift.
///
/// # Examples
///
/// ```
/// use pvrx::core::gpu::Color;
///
/// let color = Color::from_command(0x0011_2233);
/// assert_eq!(color.r, 0x33);
/// assert_eq!(color.g, 0x22);
/// assert_eq!(color.b, 0x11);
/// assert_eq!(color.to_argb(), 0x0033_2211);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Decode a color from a GP0 command word.
    ///
    /// The stored byte order is `pad, B, G, R` (red in the low byte);
    /// `swap_bytes() >> 8` yields `0x00RRGGBB`, which is also the packed
    /// hardware color returned by [`Color::to_argb`].
    pub fn from_command(word: u32) -> Self {
        let rgb = word.swap_bytes() >> 8;
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Pack into a hardware `0x00RRGGBB` color word.
    ///
    /// The alpha byte stays zero; opaque-list submissions ignore it.
    pub fn to_argb(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

/// A 2D vertex position carried in a GP0 command word
///
/// Coordinates are signed 16-bit console-space values; the drawing offset is
/// added and the drawing-area origin subtracted before they are scaled into
/// device space.
///
/// # Examples
///
/// ```
/// use pvrx::core::gpu::Vertex;
///
/// let vertex = Vertex::from_word(0x0064_0032);
/// assert_eq!(vertex.x, 50);
/// assert_eq!(vertex.y, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    /// X coordinate (signed 16-bit)
    pub x: i16,
    /// Y coordinate (signed 16-bit)
    pub y: i16,
}

impl Vertex {
    /// Decode a vertex from a command word (X in bits 0-15, Y in bits 16-31).
    pub fn from_word(word: u32) -> Self {
        Self {
            x: word as i16,
            y: (word >> 16) as i16,
        }
    }
}

/// The drawing area rectangle, top-left inclusive
///
/// Set by GP0(0xE3) / GP0(0xE4). The decoder only stores the corners; actual
/// clipping is left to the rasterizer's scissoring. Coordinates are in
/// console pixel space and are never validated against framebuffer bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawingArea {
    /// Top-left X coordinate
    pub x1: u16,
    /// Top-left Y coordinate
    pub y1: u16,
    /// Bottom-right X coordinate
    pub x2: u16,
    /// Bottom-right Y coordinate
    pub y2: u16,
}

bitflags! {
    /// VRAM mask-bit settings from GP0(0xE6)
    ///
    /// Accepted from the command stream and readable by the core, but not
    /// enforced: the PowerVR path has no per-pixel mask-bit storage, so
    /// neither write protection nor read masking is implemented.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MaskSettings: u32 {
        /// Set bit 15 on every drawn pixel
        const SET_MASK = 1 << 0;
        /// Skip pixels that already have bit 15 set
        const CHECK_MASK = 1 << 1;
    }
}

/// Bounded scratch buffer for one command's words
///
/// Each decode iteration copies the command word plus its operands here
/// before dispatch, so handlers never read past the declared length and
/// never alias the caller's list buffer. Sixteen words covers the longest
/// table entry with room to spare.
#[derive(Debug, Clone, Copy)]
pub struct PacketBuffer {
    words: [u32; Self::MAX_WORDS],
}

impl PacketBuffer {
    /// Maximum command size in words (64 bytes)
    pub const MAX_WORDS: usize = 16;

    /// Create a zeroed packet buffer.
    pub fn new() -> Self {
        Self {
            words: [0; Self::MAX_WORDS],
        }
    }

    /// Copy one command (opcode word plus operands) into the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `src` is longer than [`PacketBuffer::MAX_WORDS`]. The
    /// decoder's length table tops out at 12 words, so this cannot happen
    /// for table-driven loads.
    pub fn load(&mut self, src: &[u32]) {
        self.words[..src.len()].copy_from_slice(src);
    }

    /// Read the `i`-th 32-bit word.
    #[inline]
    pub fn word(&self, i: usize) -> u32 {
        self.words[i]
    }

    /// Read the `i`-th 16-bit halfword (little-endian within each word).
    #[inline]
    pub fn half(&self, i: usize) -> u16 {
        let word = self.words[i / 2];
        if i % 2 == 0 {
            word as u16
        } else {
            (word >> 16) as u16
        }
    }

    /// Decode the `i`-th word as a vertex position.
    #[inline]
    pub fn vertex(&self, i: usize) -> Vertex {
        Vertex::from_word(self.words[i])
    }

    /// Decode the `i`-th word as a command color.
    #[inline]
    pub fn color(&self, i: usize) -> Color {
        Color::from_command(self.words[i])
    }
}

impl Default for PacketBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal/vertical display scale pair
///
/// Maps raw console resolution into the fixed 320x240 logical screen that
/// the 640x480 display mode letterboxes. Recomputed whenever the video mode
/// changes; consumed by the coordinate mapper on every vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenScale {
    /// `320.0 / raw_width`
    pub fw: f32,
    /// `240.0 / raw_height`
    pub fh: f32,
}

impl ScreenScale {
    /// Compute the scale pair for a raw console resolution.
    pub fn for_raw(raw_w: u32, raw_h: u32) -> Self {
        Self {
            fw: 320.0 / raw_w as f32,
            fh: 240.0 / raw_h as f32,
        }
    }
}

impl Default for ScreenScale {
    fn default() -> Self {
        // 320x240 raw resolution maps 1:1.
        Self { fw: 1.0, fh: 1.0 }
    }
}
