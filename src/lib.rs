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

//! PowerVR hardware renderer backend for PlayStation GPU command lists
//!
//! This library translates the PlayStation GP0 command stream into draw
//! submissions for a tile-based, texture-mapped rasterizer of the PowerVR
//! class. It sits between an emulated console core (which supplies command
//! list buffers and completed frames) and the hardware port (which accepts
//! 32-byte tile-accelerator records and texture-memory burst writes).
//!
//! # Example
//!
//! ```
//! use pvrx::core::gpu::{NullPort, Renderer};
//! use pvrx::core::timing::CycleTally;
//!
//! let mut renderer = Renderer::new(NullPort);
//! renderer.init();
//!
//! // Decode a single "set drawing offset" command.
//! let mut tally = CycleTally::default();
//! let result = renderer.do_cmd_list(&[0xE500_0000], &mut tally);
//! assert_eq!(result.words, 1);
//! assert_eq!(renderer.draw_offset(), (0, 0));
//! ```

pub mod core;
