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

//! Consumption bookkeeping and chunked delivery

use proptest::prelude::*;

use super::{decode, renderer};
use crate::core::gpu::CMD_LENGTHS;
use crate::core::timing::CycleTally;

#[test]
fn test_every_opcode_consumes_its_table_width() {
    for op in 0..=255u8 {
        let len = CMD_LENGTHS[op as usize] as usize;
        let list = vec![u32::from(op) << 24; 1 + len];

        let mut r = renderer();
        let (result, _) = decode(&mut r, &list);
        assert_eq!(result.words, 1 + len, "opcode 0x{op:02X}");
        assert_eq!(result.last_command, Some(op), "opcode 0x{op:02X}");
    }
}

#[test]
fn test_mixed_stream_consumes_every_command() {
    let mut r = renderer();
    let list = [
        0xE100_0042,               // texture page
        0x0200_00FF, 0, 0x0010_0010, // fill
        0x2800_FF00, 0, 0x0000_0040, 0x0040_0000, 0x0040_0040, // flat quad
        0x4000_00FF, 0, 0x0008_0008, // line
    ];
    let (result, _) = decode(&mut r, &list);
    assert_eq!(result.words, list.len());
    assert_eq!(result.last_command, Some(0x40));
    // Quad: header + 4. Line: header + 6.
    assert_eq!(r.port().records.len(), 11);
}

#[test]
fn test_truncated_command_is_left_for_the_next_pass() {
    let mut r = renderer();
    // A drawing offset, then a flat quad missing its last two vertices.
    let list = [0xE500_0000 | 3, 0x2800_00FF, 0, 0x0000_0040];
    let (result, _) = decode(&mut r, &list);

    assert_eq!(result.words, 1);
    assert_eq!(result.last_command, None);
    // The state command before the break still applied.
    assert_eq!(r.draw_offset().0, 3);
    assert!(r.port().records.is_empty());
}

#[test]
fn test_chunked_delivery_resumes_cleanly() {
    let full = [0x2800_00FF, 0, 0x0000_0040, 0x0040_0000, 0x0040_0040];

    let mut whole = renderer();
    decode(&mut whole, &full);

    let mut chunked = renderer();
    let (first, _) = decode(&mut chunked, &full[..3]);
    assert_eq!(first.words, 0);
    assert_eq!(first.last_command, None);
    // The caller re-delivers the unconsumed tail plus the new words.
    let (second, _) = decode(&mut chunked, &full);
    assert_eq!(second.words, full.len());

    assert_eq!(whole.port().records, chunked.port().records);
}

#[test]
fn test_status_bits_mirror_into_ex_regs() {
    let mut r = renderer();
    decode(&mut r, &[0xE100_0155]);
    assert_eq!(r.ex_regs()[1] & 0x1FF, r.status() & 0x1FF);

    // The mirror refreshes even on passes without state commands.
    decode(&mut r, &[0x0000_0000]);
    assert_eq!(r.ex_regs()[1] & 0x1FF, 0x155);
}

#[test]
fn test_tally_accumulates_across_passes() {
    let mut r = renderer();
    let mut tally = CycleTally::resume(7);

    r.do_cmd_list(&[0x0200_0000, 0, 0x0010_0010], &mut tally);
    let after_fill = tally.sum;
    assert!(after_fill > 0);
    assert_eq!(tally.last, 7 + after_fill);

    r.do_cmd_list(&[0x2000_0000, 0, 1, 2], &mut tally);
    assert!(tally.sum > after_fill);
}

proptest! {
    /// The consumed prefix of any list re-walks exactly at table widths.
    #[test]
    fn prop_consumption_respects_the_length_table(list in prop::collection::vec(any::<u32>(), 0..64)) {
        let mut r = renderer();
        let (result, _) = decode(&mut r, &list);

        prop_assert!(result.words <= list.len());

        let mut pos = 0;
        while pos < result.words {
            let len = CMD_LENGTHS[(list[pos] >> 24) as usize] as usize;
            prop_assert!(pos + 1 + len <= result.words);
            pos += 1 + len;
        }
        prop_assert_eq!(pos, result.words);

        // A partial return means the next command really does not fit.
        if result.last_command.is_none() {
            let len = CMD_LENGTHS[(list[result.words] >> 24) as usize] as usize;
            prop_assert!(result.words + 1 + len > list.len());
        } else {
            prop_assert_eq!(result.words, list.len());
        }
    }

    /// Splitting a list at any point and re-delivering the tail consumes
    /// the same total as one pass.
    #[test]
    fn prop_split_delivery_consumes_the_same_words(
        list in prop::collection::vec(any::<u32>(), 1..48),
        split in 0usize..48,
    ) {
        let split = split.min(list.len());

        let mut whole = renderer();
        let (full, _) = decode(&mut whole, &list);

        let mut chunked = renderer();
        let (head, _) = decode(&mut chunked, &list[..split]);
        let (tail, _) = decode(&mut chunked, &list[head.words..]);

        prop_assert_eq!(head.words + tail.words, full.words);
    }
}
