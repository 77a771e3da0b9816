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

//! Frame presentation pipeline
//!
//! Each completed console frame is converted into a 1024x512 16-bit texture
//! in the presentation surface, then drawn as one textured quad inside a
//! full hardware scene. The quad is positioned so the console's visible
//! region lands centered on the fixed 320x240 logical screen, letterboxed
//! into the 640x480 output mode.
//!
//! The same scene bracket also carries the decoder's primitive submissions;
//! both run on the caller's thread through the shared [`PvrPort`].

mod convert;
#[cfg(test)]
mod tests;

use std::time::Instant;

use crate::core::error::{Result, RendererError};
use crate::core::gpu::{
    DrSlot, PolyHeader, PvrPort, ScreenScale, TaVertex, TextureFormat, ta,
};

/// Presentation surface width in pixels.
pub const TEX_WIDTH: usize = 1024;
/// Presentation surface height in pixels.
pub const TEX_HEIGHT: usize = 512;

/// Receiver for the once-per-second frame-rate report.
///
/// The original front end printed this to an attached memory-card LCD; a
/// host build can route it to a window title or a log line.
pub trait DiagnosticsSink {
    /// Called roughly once per second with the frame count of the elapsed
    /// window and the current video mode.
    fn fps_report(&mut self, fps: f32, w: u32, h: u32, bpp: u32);
}

/// Presentation pipeline state
///
/// Owns the display scale pair, the video-mode record, and the frame-rate
/// counters. The surface memory itself belongs to the port; this type holds
/// whether it is open.
pub struct DisplayOutput {
    scale: ScreenScale,
    screen_w: u32,
    screen_h: u32,
    screen_bpp: u32,
    surface_open: bool,
    frames: u32,
    timer: Option<Instant>,
    diagnostics: Option<Box<dyn DiagnosticsSink>>,
}

impl DisplayOutput {
    pub fn new() -> Self {
        Self {
            scale: ScreenScale::default(),
            screen_w: 0,
            screen_h: 0,
            screen_bpp: 0,
            surface_open: false,
            frames: 0,
            timer: None,
            diagnostics: None,
        }
    }

    /// Current display scale pair.
    pub fn scale(&self) -> ScreenScale {
        self.scale
    }

    /// Whether the presentation surface is allocated.
    pub fn is_open(&self) -> bool {
        self.surface_open
    }

    /// Install a diagnostics sink for the frame-rate report.
    pub fn set_diagnostics(&mut self, sink: Box<dyn DiagnosticsSink>) {
        self.diagnostics = Some(sink);
    }

    /// Allocate the presentation surface on the port.
    pub fn open<P: PvrPort + ?Sized>(&mut self, port: &mut P) -> Result<()> {
        port.open_surface(TEX_WIDTH * TEX_HEIGHT * 2)?;
        self.surface_open = true;
        log::debug!("presentation surface open ({TEX_WIDTH}x{TEX_HEIGHT}, 16bpp)");
        Ok(())
    }

    /// Release the presentation surface.
    pub fn close<P: PvrPort + ?Sized>(&mut self, port: &mut P) {
        if self.surface_open {
            port.close_surface();
            self.surface_open = false;
        }
    }

    /// Record the video mode and recompute the display scale pair.
    ///
    /// `raw_w`/`raw_h` are the console's scanout resolution; the scale maps
    /// them onto the 320x240 logical screen. `bpp` selects which converter
    /// and texture format [`DisplayOutput::flip`] uses for 15bpp sources
    /// versus 24bpp ones.
    pub fn set_mode(&mut self, _w: u32, _h: u32, raw_w: u32, raw_h: u32, bpp: u32) {
        self.screen_w = raw_w;
        self.screen_h = raw_h;
        self.screen_bpp = bpp;
        self.scale = ScreenScale::for_raw(raw_w, raw_h);
        log::debug!("video mode {raw_w}x{raw_h} {bpp}bpp");
    }

    /// Present one frame.
    ///
    /// Converts the `w` x `h` region of the console framebuffer scanning
    /// out at `(x, y)` into the surface, then submits a full scene drawing
    /// it as a letterboxed quad. `vram` points at the region's first pixel
    /// and `stride` is the framebuffer pitch in 16-bit units; `bgr24`
    /// selects the 24bpp converter. A `None` frame (console display
    /// disabled) presents nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn flip<P: PvrPort + ?Sized>(
        &mut self,
        port: &mut P,
        vram: Option<&[u32]>,
        stride: usize,
        bgr24: bool,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        _dims_changed: bool,
    ) {
        let Some(vram) = vram else { return };

        if !self.surface_open {
            log::warn!("flip skipped: {}", RendererError::SurfaceNotOpen);
            return;
        }

        if bgr24 {
            convert::copy24(port, vram, stride, w as usize, h as usize);
        } else {
            convert::copy15(port, vram, stride, w as usize, h as usize);
        }

        // Center the scanout region on the logical screen, then double it
        // into the 640x480 output mode.
        let ymin = 240.0 - (y + h) as f32 * self.scale.fh;
        let ymax = 480.0 - ymin;
        let xmin = 320.0 - (x + w) as f32 * self.scale.fw;
        let xmax = 640.0 - xmin;

        let umax = w as f32 / TEX_WIDTH as f32;
        let vmax = h as f32 / TEX_HEIGHT as f32;

        let format = if bgr24 {
            TextureFormat::Rgb565
        } else {
            TextureFormat::Argb1555
        };

        port.wait_ready();
        port.scene_begin();
        port.list_begin();

        let header = PolyHeader::textured(format, TEX_WIDTH as u32, TEX_HEIGHT as u32);
        let mut slot = DrSlot::acquire(port);
        slot.header(&header);
        slot.commit();

        let corners = [
            (xmin, ymin, 0.0, 0.0),
            (xmax, ymin, umax, 0.0),
            (xmin, ymax, 0.0, vmax),
            (xmax, ymax, umax, vmax),
        ];
        for (i, &(vx, vy, u, v)) in corners.iter().enumerate() {
            let vertex = TaVertex {
                flags: if i == 3 {
                    ta::TA_PARAM_VERTEX_EOL
                } else {
                    ta::TA_PARAM_VERTEX
                },
                x: vx,
                y: vy,
                z: 1.0,
                u,
                v,
                argb: 0xFFFF_FFFF,
                oargb: 0,
            };
            let mut slot = DrSlot::acquire(port);
            slot.vertex(&vertex);
            slot.commit();
        }

        port.list_finish();
        port.scene_finish();

        self.count_frame();
    }

    /// Advance the frame-rate counters and emit the report once per second.
    fn count_frame(&mut self) {
        self.frames += 1;

        let Some(armed) = self.timer else {
            self.timer = Some(Instant::now());
            return;
        };

        if armed.elapsed().as_millis() > 1000 {
            if let Some(sink) = self.diagnostics.as_mut() {
                sink.fps_report(
                    self.frames as f32,
                    self.screen_w,
                    self.screen_h,
                    self.screen_bpp,
                );
            }
            self.timer = Some(Instant::now());
            self.frames = 0;
        }
    }
}

impl Default for DisplayOutput {
    fn default() -> Self {
        Self::new()
    }
}
