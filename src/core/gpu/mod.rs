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

//! GPU command-list decoder and renderer state
//!
//! This module interprets the PlayStation GP0 command stream and re-emits
//! each primitive as PowerVR tile-accelerator submissions. The command
//! stream is a buffer of 32-bit words: the opcode sits in the top byte of
//! the first word of each command, and a static table gives the operand
//! word count for every opcode.
//!
//! # Decoding model
//!
//! Commands are processed atomically: either a command's full payload is
//! available and it executes to completion, or decoding stops before it and
//! the caller re-invokes once more words arrive. This is how the decoder
//! tolerates command lists split across emulated-DMA chunks.
//!
//! # State
//!
//! Specific opcodes mutate the renderer state (texture page, drawing area,
//! drawing offset, mask bits); every primitive handler reads it. The state
//! lives in the [`Renderer`] context object, so independent renderer
//! instances never interfere.
//!
//! # Fidelity gaps
//!
//! Textured and semi-transparent primitives are consumed at their correct
//! word width but only logged, not rendered. Chained poly-lines render
//! their first segment only. See the handler modules for the per-opcode
//! details.

pub mod coords;
mod gp0;
pub mod ta;
mod tables;
#[cfg(test)]
mod tests;
mod types;

// Public re-exports
pub use ta::{DrSlot, NullPort, PolyHeader, PvrPort, TaRecord, TaVertex, TextureFormat};
pub use tables::CMD_LENGTHS;
pub use types::*;

use crate::core::display::DisplayOutput;
use crate::core::timing::CycleTally;

/// Outcome of one decode pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeResult {
    /// Number of words fully consumed from the list
    pub words: usize,
    /// Opcode of the last command processed, or `None` if the list ended in
    /// the middle of a command (the caller should buffer the tail and
    /// re-invoke once more words arrive)
    pub last_command: Option<u8>,
}

/// Renderer context: decoder state plus the hardware port
///
/// One instance per renderer. The decoder, the primitive emitters, and the
/// presentation pipeline all run on the caller's thread and share the
/// port's command FIFO, serialized by the `&mut` receiver.
///
/// # Examples
///
/// ```
/// use pvrx::core::gpu::{NullPort, Renderer};
/// use pvrx::core::timing::CycleTally;
///
/// let mut renderer = Renderer::new(NullPort);
/// renderer.init();
///
/// // Set the drawing area top-left corner to (32, 16).
/// let mut tally = CycleTally::default();
/// renderer.do_cmd_list(&[0xE300_0000 | 32 | (16 << 10)], &mut tally);
/// assert_eq!(renderer.draw_area().x1, 32);
/// assert_eq!(renderer.draw_area().y1, 16);
/// ```
pub struct Renderer<P: PvrPort> {
    /// Status word. The low 11 bits mirror the most recent texture-page
    /// command; the high bits belong to the external core and are never
    /// touched here.
    gp1: u32,

    /// Drawing area corners, top-left inclusive
    draw_area: DrawingArea,

    /// Signed drawing offset added to every primitive vertex
    draw_offset: (i16, i16),

    /// VRAM mask-bit settings (accepted, not enforced)
    mask: MaskSettings,

    /// Extended register image shared with the external core. The state
    /// opcodes 0xE1-0xE6 record their raw words at indices 1-6, and the
    /// low 9 bits of entry 1 are re-merged from `gp1` after every decode
    /// pass.
    ex_regs: [u32; 8],

    /// Hardware port (TA FIFO, texture memory, scene bracket)
    port: P,

    /// Presentation pipeline state
    display: DisplayOutput,
}

impl<P: PvrPort> Renderer<P> {
    /// Status word value at renderer startup
    pub const STATUS_DEFAULT: u32 = 0x1480_2000;

    /// Create a renderer driving the given hardware port.
    pub fn new(port: P) -> Self {
        Self {
            gp1: Self::STATUS_DEFAULT,
            draw_area: DrawingArea::default(),
            draw_offset: (0, 0),
            mask: MaskSettings::empty(),
            ex_regs: [0; 8],
            port,
            display: DisplayOutput::new(),
        }
    }

    /// Reset all decoder state to startup defaults.
    ///
    /// Called once at renderer startup and again whenever the core re-opens
    /// the plugin. The presentation surface is not touched; that is
    /// [`Renderer::open`]'s job.
    pub fn init(&mut self) {
        log::debug!("PVR renderer init");
        self.gp1 = Self::STATUS_DEFAULT;
        self.draw_area = DrawingArea::default();
        self.draw_offset = (0, 0);
        self.mask = MaskSettings::empty();
        self.ex_regs = [0; 8];
    }

    /// Tear down the renderer. No state persists.
    pub fn finish(&mut self) {
        log::debug!("PVR renderer finish");
    }

    /// Replay the core's fixed 6-word setup block (extended commands).
    ///
    /// The block carries one word per state opcode 0xE1-0xE6, preceded by a
    /// header word that is not part of the stream.
    pub fn sync_ecmds(&mut self, ecmds: &[u32; 7]) {
        let mut tally = CycleTally::default();
        self.do_cmd_list(&ecmds[1..], &mut tally);
    }

    /// Notification that a VRAM region changed. No cache to keep coherent
    /// on this backend yet, so nothing to do.
    pub fn update_caches(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _state_changed: bool) {}

    /// Flush any buffered submissions. The store-queue path publishes every
    /// record at commit time, so nothing is buffered here.
    pub fn flush_queues(&mut self) {}

    /// Synchronize with the hardware. Submission is synchronous on this
    /// backend.
    pub fn sync(&mut self) {}

    /// Notification that the display resolution changed.
    pub fn notify_res_change(&mut self) {}

    /// Notification that the scanout origin changed.
    pub fn notify_scanout_change(&mut self, _x: i32, _y: i32) {}

    /// Notification that the interlace field flipped.
    pub fn notify_update_lace(&mut self, _updated: bool) {}

    /// Decode one command-list buffer.
    ///
    /// Iterates the buffer at command boundaries: reads the opcode from the
    /// top byte, looks up the operand length, and dispatches once the full
    /// payload is present. Stops early (without error) when the list ends
    /// mid-command and reports the partial consumption count so the caller
    /// can resume.
    ///
    /// Cycle costs for processed primitives are charged to `tally`. After
    /// the pass, the low 9 bits of the status word are merged back into the
    /// external register image.
    pub fn do_cmd_list(&mut self, list: &[u32], tally: &mut CycleTally) -> DecodeResult {
        let mut pos = 0;
        let mut last_command = Some(0u8);
        let mut packet = PacketBuffer::new();

        while pos < list.len() {
            let op = (list[pos] >> 24) as u8;
            let len = CMD_LENGTHS[op as usize] as usize;

            if pos + 1 + len > list.len() {
                last_command = None;
                break;
            }

            packet.load(&list[pos..pos + 1 + len]);

            match op {
                // NOP and the cache-clear command
                0x00 | 0x01 => {}

                0x02 => self.cmd_fill_rect(&packet, tally),

                // Flat/shaded untextured polygons
                0x20 | 0x28 | 0x30 | 0x38 => self.cmd_polygon(op, &packet, tally),

                // Textured and semi-transparent polygon variants: consumed
                // at the correct width, not rendered
                0x21..=0x27 | 0x29..=0x2F | 0x31..=0x37 | 0x39..=0x3F => {
                    log::debug!("unrendered polygon command 0x{:02X}", op)
                }

                // Monochrome/shaded lines
                0x40 | 0x50 => self.cmd_line(op, &packet, tally),

                // Remaining line variants: consumed, not rendered
                0x41..=0x4F | 0x51..=0x5A => {
                    log::debug!("unrendered line command 0x{:02X}", op)
                }

                0x60 => self.cmd_rect(&packet, tally),

                // Remaining rectangle variants: consumed, not rendered
                0x61..=0x7F => log::debug!("unrendered rectangle command 0x{:02X}", op),

                // VRAM access commands; image payloads are moved by the
                // core, not by this renderer
                0x80..=0xDF => {}

                0xE1 => self.cmd_texture_page(&packet),
                0xE2 => self.cmd_texture_window(&packet),
                0xE3 => self.cmd_draw_area_top_left(&packet),
                0xE4 => self.cmd_draw_area_bottom_right(&packet),
                0xE5 => self.cmd_draw_offset(&packet),
                0xE6 => self.cmd_mask_settings(&packet),

                _ => log::debug!("unhandled GPU command 0x{:02X}", op),
            }

            last_command = Some(op);
            pos += 1 + len;
        }

        // Mirror the texture-page bits back into the external register
        // image the core reads after every pass.
        self.ex_regs[1] = (self.ex_regs[1] & !0x1FF) | (self.gp1 & 0x1FF);

        DecodeResult {
            words: pos,
            last_command,
        }
    }

    /// Current status word.
    pub fn status(&self) -> u32 {
        self.gp1
    }

    /// Current drawing area.
    pub fn draw_area(&self) -> DrawingArea {
        self.draw_area
    }

    /// Current drawing offset.
    pub fn draw_offset(&self) -> (i16, i16) {
        self.draw_offset
    }

    /// Current mask-bit settings.
    pub fn mask(&self) -> MaskSettings {
        self.mask
    }

    /// Extended register image shared with the core.
    pub fn ex_regs(&self) -> &[u32; 8] {
        &self.ex_regs
    }

    /// The hardware port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// The presentation pipeline.
    pub fn display(&self) -> &DisplayOutput {
        &self.display
    }

    /// Allocate the presentation surface.
    pub fn open(&mut self) -> crate::core::error::Result<()> {
        self.display.open(&mut self.port)
    }

    /// Release the presentation surface.
    pub fn close(&mut self) {
        self.display.close(&mut self.port);
    }

    /// Select the video mode and recompute the display scale pair.
    pub fn set_mode(&mut self, w: u32, h: u32, raw_w: u32, raw_h: u32, bpp: u32) {
        self.display.set_mode(w, h, raw_w, raw_h, bpp);
    }

    /// Present one completed frame. See [`DisplayOutput::flip`].
    #[allow(clippy::too_many_arguments)]
    pub fn flip(
        &mut self,
        vram: Option<&[u32]>,
        stride: usize,
        bgr24: bool,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        dims_changed: bool,
    ) {
        self.display
            .flip(&mut self.port, vram, stride, bgr24, x, y, w, h, dims_changed);
    }

    /// Install a diagnostics sink for the once-per-second FPS report.
    pub fn set_diagnostics(&mut self, sink: Box<dyn crate::core::display::DiagnosticsSink>) {
        self.display.set_diagnostics(sink);
    }

    // -- shared emission helpers used by the gp0 handlers --

    /// Submit the untextured 2D overlay polygon header.
    pub(in crate::core::gpu) fn push_header(&mut self) {
        let header = PolyHeader::untextured();
        let mut slot = DrSlot::acquire(&mut self.port);
        slot.header(&header);
        slot.commit();
    }

    /// Map a console-space vertex and submit it.
    pub(in crate::core::gpu) fn push_vertex(&mut self, x: i16, y: i16, argb: u32, eol: bool) {
        let scale = self.display.scale();
        let vertex = TaVertex {
            flags: if eol {
                ta::TA_PARAM_VERTEX_EOL
            } else {
                ta::TA_PARAM_VERTEX
            },
            x: coords::x_to_device(x, self.draw_offset.0, self.draw_area.x1, scale.fw),
            y: coords::y_to_device(y, self.draw_offset.1, self.draw_area.y1, scale.fh),
            z: 1.0,
            u: 0.0,
            v: 0.0,
            argb,
            oargb: 0,
        };
        let mut slot = DrSlot::acquire(&mut self.port);
        slot.vertex(&vertex);
        slot.commit();
    }
}
