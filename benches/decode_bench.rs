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

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use pvrx::core::gpu::{NullPort, Renderer};
use pvrx::core::timing::CycleTally;
use std::hint::black_box;

/// A synthetic frame's worth of commands: state setup then a mix of
/// primitives in roughly game-like proportions.
fn build_command_list() -> Vec<u32> {
    let mut list = vec![0xE100_000A, 0xE300_0000, 0xE400_0000 | 319 | (239 << 10), 0xE500_0000];

    for i in 0..200u32 {
        let x = (i % 300) as u32;
        let y = (i % 220) as u32;
        let v0 = (y << 16) | x;

        match i % 4 {
            // Flat quad
            0 => list.extend_from_slice(&[
                0x2800_8040,
                v0,
                v0 + 16,
                v0 + (16 << 16),
                v0 + (16 << 16) + 16,
            ]),
            // Shaded triangle
            1 => list.extend_from_slice(&[
                0x3000_00FF,
                v0,
                0x0000_FF00,
                v0 + 32,
                0x00FF_0000,
                v0 + (32 << 16),
            ]),
            // Line
            2 => list.extend_from_slice(&[0x4000_FFFF, v0, v0 + (8 << 16) + 24]),
            // Rectangle
            _ => list.extend_from_slice(&[0x6000_2020, v0, 0x0008_0010]),
        }
    }

    list
}

fn decode_benchmark(c: &mut Criterion) {
    let list = build_command_list();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(list.len() as u64));

    group.bench_function("mixed_frame", |b| {
        let mut renderer = Renderer::new(NullPort);
        renderer.init();

        b.iter(|| {
            let mut tally = CycleTally::default();
            black_box(renderer.do_cmd_list(black_box(&list), &mut tally));
        });
    });

    group.bench_function("state_only", |b| {
        let mut renderer = Renderer::new(NullPort);
        renderer.init();
        let states = [0xE100_0042, 0xE300_0000, 0xE400_0000, 0xE500_0000, 0xE600_0000];

        b.iter(|| {
            let mut tally = CycleTally::default();
            black_box(renderer.do_cmd_list(black_box(&states), &mut tally));
        });
    });

    group.finish();
}

fn flip_benchmark(c: &mut Criterion) {
    let vram = vec![0x7FFF_7FFFu32; 320 * 240 / 2];

    c.bench_function("flip_320x240_15bpp", |b| {
        let mut renderer = Renderer::new(NullPort);
        renderer.init();
        renderer.open().unwrap();
        renderer.set_mode(320, 240, 320, 240, 15);

        b.iter(|| {
            renderer.flip(Some(black_box(&vram)), 320, false, 0, 0, 320, 240, false);
        });
    });
}

criterion_group!(benches, decode_benchmark, flip_benchmark);
criterion_main!(benches);
