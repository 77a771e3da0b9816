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

//! Console-to-device coordinate mapping
//!
//! Pure functions converting console pixel coordinates into device space:
//! the drawing offset is added, the drawing-area origin subtracted, and the
//! result scaled by the current display scale factor.
//!
//! All intermediate arithmetic wraps exactly like native signed 16-bit
//! arithmetic. Offscreen primitives rely on this wraparound, so the sum must
//! not be widened before scaling.

/// Map a console-space X coordinate into device space.
#[inline]
pub fn x_to_device(x: i16, offset_x: i16, area_x1: u16, fw: f32) -> f32 {
    f32::from(x.wrapping_add(offset_x).wrapping_sub(area_x1 as i16)) * fw
}

/// Map a console-space Y coordinate into device space.
#[inline]
pub fn y_to_device(y: i16, offset_y: i16, area_y1: u16, fh: f32) -> f32 {
    f32::from(y.wrapping_add(offset_y).wrapping_sub(area_y1 as i16)) * fh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        assert_eq!(x_to_device(100, 0, 0, 1.0), 100.0);
        assert_eq!(y_to_device(50, 0, 0, 1.0), 50.0);
    }

    #[test]
    fn test_offset_and_origin() {
        // (100 + 20 - 10) * 0.5
        assert_eq!(x_to_device(100, 20, 10, 0.5), 55.0);
    }

    #[test]
    fn test_mapping_is_linear() {
        // Differences are preserved under any constant offset.
        let (x1, x2, dx) = (37i16, -12i16, 1000i16);
        let a = x_to_device(x1.wrapping_add(dx), 5, 3, 0.5)
            - x_to_device(x2.wrapping_add(dx), 5, 3, 0.5);
        let b = x_to_device(x1, 5, 3, 0.5) - x_to_device(x2, 5, 3, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_wraps_like_native_i16() {
        // 0x7FFF + 1 wraps to -0x8000 before scaling.
        assert_eq!(x_to_device(i16::MAX, 1, 0, 1.0), f32::from(i16::MIN));
    }
}
