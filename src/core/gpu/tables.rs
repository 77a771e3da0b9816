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

//! GP0 opcode operand-length table
//!
//! The command stream is self-describing only through this table: each
//! opcode has a fixed operand word count, independent of payload content.
//! The decoder reads `1 + CMD_LENGTHS[opcode]` words per command.
//!
//! The variable-length commands (VRAM image transfers 0xA0/0xC0, chained
//! poly-lines) are split into fixed-size chunks upstream by the core before
//! they reach this renderer, which is why every entry here is constant.

/// Operand word count for each of the 256 GP0 opcodes.
#[rustfmt::skip]
pub static CMD_LENGTHS: [u8; 256] = [
    0, 0, 2, 0,  0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0, // 0x00
    0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0, // 0x10
    3, 3, 3, 3,  6, 6, 6, 6,  4, 4, 4, 4,  8, 8, 8, 8, // 0x20
    5, 5, 5, 5,  8, 8, 8, 8,  7, 7, 7, 7, 11,11,11,11, // 0x30
    2, 2, 2, 2,  2, 2, 2, 2,  3, 3, 3, 3,  3, 3, 3, 3, // 0x40
    3, 3, 3, 3,  3, 3, 3, 3,  4, 4, 4, 4,  4, 4, 4, 4, // 0x50
    2, 2, 2, 2,  3, 3, 3, 3,  1, 1, 1, 1,  2, 2, 2, 2, // 0x60
    1, 1, 1, 1,  2, 2, 2, 2,  1, 1, 1, 1,  2, 2, 2, 2, // 0x70
    3, 3, 3, 3,  3, 3, 3, 3,  3, 3, 3, 3,  3, 3, 3, 3, // 0x80
    3, 3, 3, 3,  3, 3, 3, 3,  3, 3, 3, 3,  3, 3, 3, 3, // 0x90
    2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2, // 0xA0
    2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2, // 0xB0
    2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2, // 0xC0
    2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2,  2, 2, 2, 2, // 0xD0
    0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0, // 0xE0
    0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0, // 0xF0
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_lengths() {
        // Flat triangle: 3 vertices after the color word.
        assert_eq!(CMD_LENGTHS[0x20], 3);
        // Flat quad: 4 vertices.
        assert_eq!(CMD_LENGTHS[0x28], 4);
        // Shaded triangle: color+vertex pairs, first color in the opcode word.
        assert_eq!(CMD_LENGTHS[0x30], 5);
        // Shaded quad.
        assert_eq!(CMD_LENGTHS[0x38], 7);
        // Shaded textured quad is the longest command.
        assert_eq!(CMD_LENGTHS[0x3C], 11);
    }

    #[test]
    fn test_transfer_command_lengths() {
        // Fill: position and size words after the color.
        assert_eq!(CMD_LENGTHS[0x02], 2);
        // VRAM-to-VRAM copy and its mirrors.
        assert_eq!(CMD_LENGTHS[0x80], 3);
        assert_eq!(CMD_LENGTHS[0x9F], 3);
        // Image load/store headers; the pixel payload moves upstream.
        assert_eq!(CMD_LENGTHS[0xA0], 2);
        assert_eq!(CMD_LENGTHS[0xC0], 2);
    }

    #[test]
    fn test_state_commands_have_no_operands() {
        for op in 0xE1..=0xE6 {
            assert_eq!(CMD_LENGTHS[op], 0);
        }
    }

    #[test]
    fn test_longest_command_fits_the_scratch_buffer() {
        let max = CMD_LENGTHS.iter().copied().max().unwrap() as usize;
        assert!(1 + max <= crate::core::gpu::PacketBuffer::MAX_WORDS);
    }
}
