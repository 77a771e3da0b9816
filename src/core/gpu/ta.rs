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

//! Tile-accelerator submission layer
//!
//! The PowerVR consumes 32-byte records through a write-combined store-queue
//! fast path: the CPU fills one naturally-aligned record and commits it
//! straight into the tile accelerator's input FIFO, with no staging copy.
//!
//! This module models that path behind the [`PvrPort`] seam so the decoder
//! and the presentation pipeline can share one submission mechanism, and so
//! tests can substitute a recording port. The acquire/commit pairing of the
//! hardware store queue becomes a scoped [`DrSlot`]: the slot borrows the
//! port mutably (two slots cannot overlap) and commits on drop, so an early
//! return can never leave the FIFO holding a half-written record.

use crate::core::error::Result;

/// One 32-byte tile-accelerator record (8 words, 32-byte aligned on
/// hardware).
pub type TaRecord = [u32; 8];

/// Parameter-control word of an intermediate vertex.
pub const TA_PARAM_VERTEX: u32 = 0xE000_0000;
/// Parameter-control word of the last vertex of a primitive list.
pub const TA_PARAM_VERTEX_EOL: u32 = 0xF000_0000;
/// Parameter-control word of an opaque polygon header.
pub const TA_PARAM_POLYGON: u32 = 0x8084_0000;

// ISP instruction word fields.
const DEPTHCMP_GEQUAL: u32 = 6 << 29;
const CULLING_NONE: u32 = 0 << 27;
const ISP_TEXTURED: u32 = 1 << 25;

// TSP instruction word fields.
const BLEND_ONE_ZERO: u32 = (1 << 29) | (0 << 26);
const FILTER_NONE: u32 = 0 << 13;

// Texture-control word fields.
const TXR_NONTWIDDLED: u32 = 1 << 26;

/// Hardware texture formats used by the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 15-bit direct color plus a stencil bit
    Argb1555,
    /// 16-bit direct color
    Rgb565,
}

impl TextureFormat {
    fn control_bits(self) -> u32 {
        match self {
            TextureFormat::Argb1555 => 0 << 27,
            TextureFormat::Rgb565 => 1 << 27,
        }
    }
}

/// A compiled polygon header record
///
/// Configures the rasterizer for the vertices that follow: 2D overlay
/// settings throughout (depth test passes for equal-or-greater so flat
/// geometry at z=1 always lands, no culling so winding never drops a
/// primitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyHeader {
    cmd: u32,
    mode1: u32,
    mode2: u32,
    mode3: u32,
}

impl PolyHeader {
    /// Header for untextured, vertex-colored primitives on the opaque list.
    pub fn untextured() -> Self {
        Self {
            cmd: TA_PARAM_POLYGON,
            mode1: DEPTHCMP_GEQUAL | CULLING_NONE,
            mode2: BLEND_ONE_ZERO | FILTER_NONE,
            mode3: 0,
        }
    }

    /// Header for primitives sampling a `width` x `height` non-twiddled
    /// texture on the opaque list.
    ///
    /// `width` and `height` must be powers of two; the TA encodes each
    /// dimension as `log2(size) - 3`.
    pub fn textured(format: TextureFormat, width: u32, height: u32) -> Self {
        debug_assert!(width.is_power_of_two() && height.is_power_of_two());
        let u_size = width.trailing_zeros() - 3;
        let v_size = height.trailing_zeros() - 3;
        Self {
            cmd: TA_PARAM_POLYGON,
            mode1: DEPTHCMP_GEQUAL | CULLING_NONE | ISP_TEXTURED,
            mode2: BLEND_ONE_ZERO | FILTER_NONE | (u_size << 3) | v_size,
            mode3: TXR_NONTWIDDLED | format.control_bits(),
        }
    }

    /// Serialize to the 32-byte record shape.
    pub fn to_record(&self) -> TaRecord {
        [self.cmd, self.mode1, self.mode2, self.mode3, 0, 0, 0, 0]
    }
}

/// One hardware vertex record
///
/// Position is in device space, `z` is a constant depth for the 2D overlay,
/// `argb` a packed `0x00RRGGBB` color. `flags` must be [`TA_PARAM_VERTEX`]
/// or [`TA_PARAM_VERTEX_EOL`]; the accelerator closes the primitive on the
/// end-of-list flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaVertex {
    pub flags: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
    pub argb: u32,
    pub oargb: u32,
}

impl TaVertex {
    /// Serialize to the 32-byte record shape.
    pub fn to_record(&self) -> TaRecord {
        [
            self.flags,
            self.x.to_bits(),
            self.y.to_bits(),
            self.z.to_bits(),
            self.u.to_bits(),
            self.v.to_bits(),
            self.argb,
            self.oargb,
        ]
    }

    /// Deserialize from the record shape (the inverse of
    /// [`TaVertex::to_record`]).
    pub fn from_record(record: &TaRecord) -> Self {
        Self {
            flags: record[0],
            x: f32::from_bits(record[1]),
            y: f32::from_bits(record[2]),
            z: f32::from_bits(record[3]),
            u: f32::from_bits(record[4]),
            v: f32::from_bits(record[5]),
            argb: record[6],
            oargb: record[7],
        }
    }
}

/// The hardware seam
///
/// Everything the renderer needs from the PowerVR: record submission into
/// the TA input FIFO, burst writes into the presentation surface's texture
/// memory, and the per-frame scene bracket. A real port forwards these to
/// the hardware store queues; [`NullPort`] discards them for headless use.
///
/// All methods run on the caller's thread. The scene bracket and the record
/// stream share one FIFO, so a single `&mut` caller at a time is part of the
/// contract (and enforced by the borrow on every call).
pub trait PvrPort {
    /// Publish one 32-byte record into the TA input FIFO.
    fn push(&mut self, record: &TaRecord);

    /// Burst-write 32 bytes into the presentation surface at `offset`
    /// (counted in 32-bit words from the surface base).
    fn store(&mut self, offset: usize, burst: &TaRecord);

    /// Allocate the presentation surface (`len` bytes, 32-byte aligned).
    fn open_surface(&mut self, len: usize) -> Result<()> {
        let _ = len;
        Ok(())
    }

    /// Release the presentation surface.
    fn close_surface(&mut self) {}

    /// Block until the hardware can accept a new scene (vsync cadence).
    fn wait_ready(&mut self) {}

    /// Begin a hardware scene.
    fn scene_begin(&mut self) {}

    /// Open the opaque polygon list of the current scene.
    fn list_begin(&mut self) {}

    /// Close the current list.
    fn list_finish(&mut self) {}

    /// Finish the scene and queue it for rasterization.
    fn scene_finish(&mut self) {}
}

/// A port that discards every submission.
///
/// Useful for headless operation and for exercising the decoder without
/// hardware attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPort;

impl PvrPort for NullPort {
    fn push(&mut self, _record: &TaRecord) {}
    fn store(&mut self, _offset: usize, _burst: &TaRecord) {}
}

/// An exclusively-held direct-render slot
///
/// Acquire, fill with exactly one header or vertex record, and commit. The
/// mutable borrow on the port makes overlapping acquisitions a compile
/// error, and the record is published on drop, so every exit path commits.
pub struct DrSlot<'a, P: PvrPort + ?Sized> {
    record: TaRecord,
    port: &'a mut P,
}

impl<'a, P: PvrPort + ?Sized> DrSlot<'a, P> {
    /// Acquire a slot. Exclusive until dropped or committed.
    pub fn acquire(port: &'a mut P) -> Self {
        Self {
            record: [0; 8],
            port,
        }
    }

    /// Fill the slot with a polygon header.
    pub fn header(&mut self, header: &PolyHeader) {
        self.record = header.to_record();
    }

    /// Fill the slot with a vertex record.
    pub fn vertex(&mut self, vertex: &TaVertex) {
        self.record = vertex.to_record();
    }

    /// Publish the record and release the slot.
    pub fn commit(self) {}
}

impl<P: PvrPort + ?Sized> Drop for DrSlot<'_, P> {
    fn drop(&mut self) {
        self.port.push(&self.record);
    }
}

/// A port that records every interaction, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct CapturePort {
    pub records: Vec<TaRecord>,
    pub surface: Vec<u32>,
    pub surface_len: usize,
    pub waits: usize,
    pub scenes_begun: usize,
    pub scenes_finished: usize,
    pub lists_begun: usize,
    pub lists_finished: usize,
}

#[cfg(test)]
impl PvrPort for CapturePort {
    fn push(&mut self, record: &TaRecord) {
        self.records.push(*record);
    }

    fn store(&mut self, offset: usize, burst: &TaRecord) {
        if self.surface.len() < offset + 8 {
            self.surface.resize(offset + 8, 0);
        }
        self.surface[offset..offset + 8].copy_from_slice(burst);
    }

    fn open_surface(&mut self, len: usize) -> Result<()> {
        self.surface_len = len;
        self.surface = vec![0; len / 4];
        Ok(())
    }

    fn close_surface(&mut self) {
        self.surface_len = 0;
        self.surface.clear();
    }

    fn wait_ready(&mut self) {
        self.waits += 1;
    }

    fn scene_begin(&mut self) {
        self.scenes_begun += 1;
    }

    fn list_begin(&mut self) {
        self.lists_begun += 1;
    }

    fn list_finish(&mut self) {
        self.lists_finished += 1;
    }

    fn scene_finish(&mut self) {
        self.scenes_finished += 1;
    }
}
