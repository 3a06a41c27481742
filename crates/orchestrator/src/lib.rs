// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # orchestrator
//!
//! Drives an external model toolchain through the describe → compile →
//! train → run lifecycle.
//!
//! - [`ModelOrchestrator`]: owns one description, its training samples
//!   and its name table; enforces the [`ModelState`] machine.
//! - [`ToolchainConfig`]: which programs compile, train, convert and
//!   extract, and where artifacts live (TOML).
//! - [`ArtifactLayout`]: every path read or written for one artifact.
//! - [`ProcessRunner`]: the subprocess seam; [`SystemRunner`] is the real one.
//! - [`InferenceBackend`]: the tensor runtime seam.
//!
//! # Architecture
//! ```text
//! ┌──────────────────────────┐
//! │    ModelOrchestrator     │
//! │ descriptor  batch  names │
//! └──────┬─────────────┬─────┘
//!        │             │
//!   ProcessRunner   InferenceBackend
//!        │             │
//!  compiler/trainer  tensor runtime
//!  converter/extractor
//! ```

mod backend;
mod config;
mod error;
mod layout;
mod orchestrator;
mod process;

pub use backend::InferenceBackend;
pub use config::{ToolCommand, ToolchainConfig};
pub use error::RuntimeError;
pub use layout::ArtifactLayout;
pub use orchestrator::{ModelOrchestrator, ModelState, EXPORT_DATA_FILE, EXPORT_LAYOUT_FILE};
pub use process::{Invocation, ProcessRunner, ProcessStatus, SystemRunner, ToolKind};
