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

//! Presentation pipeline tests

use crate::core::display::{DisplayOutput, TEX_HEIGHT, TEX_WIDTH};
use crate::core::gpu::ta::{self, CapturePort, TaVertex};

fn open_display(port: &mut CapturePort) -> DisplayOutput {
    let mut display = DisplayOutput::new();
    display.open(port).unwrap();
    display
}

#[test]
fn test_open_allocates_the_full_surface() {
    let mut port = CapturePort::default();
    let display = open_display(&mut port);

    assert!(display.is_open());
    assert_eq!(port.surface_len, TEX_WIDTH * TEX_HEIGHT * 2);
}

#[test]
fn test_close_releases_the_surface() {
    let mut port = CapturePort::default();
    let mut display = open_display(&mut port);

    display.close(&mut port);
    assert!(!display.is_open());
    assert_eq!(port.surface_len, 0);
}

#[test]
fn test_disabled_display_presents_nothing() {
    let mut port = CapturePort::default();
    let mut display = open_display(&mut port);

    display.flip(&mut port, None, 1024, false, 0, 0, 320, 240, false);

    assert_eq!(port.records.len(), 0);
    assert_eq!(port.scenes_begun, 0);
}

#[test]
fn test_flip_without_open_surface_is_skipped() {
    let mut port = CapturePort::default();
    let mut display = DisplayOutput::new();

    let vram = vec![0u32; 320 * 240 / 2];
    display.flip(&mut port, Some(&vram), 320, false, 0, 0, 320, 240, false);

    assert_eq!(port.records.len(), 0);
}

#[test]
fn test_flip_brackets_one_full_scene() {
    let mut port = CapturePort::default();
    let mut display = open_display(&mut port);
    display.set_mode(320, 240, 320, 240, 15);

    let vram = vec![0u32; 320 * 240 / 2];
    display.flip(&mut port, Some(&vram), 320, false, 0, 0, 320, 240, false);

    assert_eq!(port.waits, 1);
    assert_eq!(port.scenes_begun, 1);
    assert_eq!(port.lists_begun, 1);
    assert_eq!(port.lists_finished, 1);
    assert_eq!(port.scenes_finished, 1);
}

#[test]
fn test_flip_draws_one_textured_quad() {
    let mut port = CapturePort::default();
    let mut display = open_display(&mut port);
    display.set_mode(320, 240, 320, 240, 15);

    let vram = vec![0u32; 320 * 240 / 2];
    display.flip(&mut port, Some(&vram), 320, false, 0, 0, 320, 240, false);

    // One header plus four strip vertices.
    assert_eq!(port.records.len(), 5);
    assert_eq!(port.records[0][0], ta::TA_PARAM_POLYGON);

    let first = TaVertex::from_record(&port.records[1]);
    let last = TaVertex::from_record(&port.records[4]);
    assert_eq!(first.flags, ta::TA_PARAM_VERTEX);
    assert_eq!(last.flags, ta::TA_PARAM_VERTEX_EOL);

    // A 320x240 frame at the origin fills the whole 640x480 output.
    assert_eq!((first.x, first.y), (0.0, 0.0));
    assert_eq!((last.x, last.y), (640.0, 480.0));

    // Texture coordinates only span the frame's corner of the surface.
    assert_eq!(last.u, 320.0 / TEX_WIDTH as f32);
    assert_eq!(last.v, 240.0 / TEX_HEIGHT as f32);
}

#[test]
fn test_flip_letterboxes_high_resolution_modes() {
    let mut port = CapturePort::default();
    let mut display = open_display(&mut port);
    display.set_mode(640, 480, 640, 480, 15);

    let vram = vec![0u32; 16 * 2 / 2];
    // A 16x2 scanout region at (0, 0) of a 640x480 mode.
    display.flip(&mut port, Some(&vram), 16, false, 0, 0, 16, 2, false);

    let first = TaVertex::from_record(&port.records[1]);
    // 640x480 raw maps at half scale: xmin = 320 - 16 * 0.5.
    assert_eq!(first.x, 312.0);
    assert_eq!(first.y, 239.0);
}

#[test]
fn test_fps_report_waits_a_full_second() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink(Arc<AtomicUsize>);

    impl crate::core::display::DiagnosticsSink for CountingSink {
        fn fps_report(&mut self, _fps: f32, _w: u32, _h: u32, _bpp: u32) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    let reports = Arc::new(AtomicUsize::new(0));
    let mut port = CapturePort::default();
    let mut display = open_display(&mut port);
    display.set_mode(320, 240, 320, 240, 15);
    display.set_diagnostics(Box::new(CountingSink(Arc::clone(&reports))));

    // The first flip arms the timer; the second is well inside the window.
    let vram = vec![0u32; 320 * 240 / 2];
    display.flip(&mut port, Some(&vram), 320, false, 0, 0, 320, 240, false);
    display.flip(&mut port, Some(&vram), 320, false, 0, 0, 320, 240, false);

    assert_eq!(reports.load(Ordering::Relaxed), 0);
}

#[test]
fn test_mode_change_updates_scale() {
    let mut display = DisplayOutput::new();
    display.set_mode(640, 480, 640, 480, 15);
    assert_eq!(display.scale().fw, 0.5);
    assert_eq!(display.scale().fh, 0.5);

    display.set_mode(256, 240, 256, 240, 24);
    assert_eq!(display.scale().fw, 320.0 / 256.0);
    assert_eq!(display.scale().fh, 1.0);
}
