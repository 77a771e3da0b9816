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

/// Renderer error types
use thiserror::Error;

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, RendererError>;

/// Main error type for the renderer
///
/// The command-list decode path never reports errors: malformed or
/// unimplemented commands are consumed and skipped, and a list that ends
/// mid-command is a normal partial-consumption return. Errors only exist at
/// the resource seams (surface allocation, alignment), where the system
/// cannot run at all if they fail.
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("failed to allocate the {width}x{height} presentation surface")]
    SurfaceAlloc { width: usize, height: usize },

    #[error("presentation surface is not 32-byte aligned")]
    UnalignedSurface,

    #[error("presentation surface used before open()")]
    SurfaceNotOpen,
}
