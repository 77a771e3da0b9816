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

//! Command-list decoder tests
//!
//! All tests drive a [`Renderer`] over a recording port and assert on the
//! submitted records, the decoder state, and the consumption bookkeeping.

mod decode;

use crate::core::gpu::ta::CapturePort;
use crate::core::gpu::{DecodeResult, Renderer};
use crate::core::timing::CycleTally;

/// A renderer over a recording port, state at startup defaults.
fn renderer() -> Renderer<CapturePort> {
    Renderer::new(CapturePort::default())
}

/// Decode one list with a fresh tally.
fn decode(renderer: &mut Renderer<CapturePort>, list: &[u32]) -> (DecodeResult, CycleTally) {
    let mut tally = CycleTally::default();
    let result = renderer.do_cmd_list(list, &mut tally);
    (result, tally)
}
