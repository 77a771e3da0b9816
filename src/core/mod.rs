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

//! Core renderer components
//!
//! This module contains the hardware renderer subsystem:
//! - GPU command-list decoder and renderer state
//! - Presentation / flip pipeline (framebuffer upload and display quad)
//! - Per-primitive CPU cycle-cost model
//! - Error types

pub mod display;
pub mod error;
pub mod gpu;
pub mod timing;

// Re-export commonly used types
pub use display::{DiagnosticsSink, DisplayOutput};
pub use error::{RendererError, Result};
pub use gpu::{DecodeResult, Renderer};
pub use timing::CycleTally;
