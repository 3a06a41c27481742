// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! The tensor value type exchanged between callers, the orchestrator and an
//! external inference backend.
//!
//! This crate provides:
//! - [`Tensor`]: an owned, typed, n-dimensional buffer.
//! - [`Shape`]: concrete dimensions, plus matching against declared shapes
//!   that use [`DYNAMIC_DIM`].
//! - [`DType`]: the element types a model descriptor may declare.
//! - [`Element`]: the sealed mapping from Rust scalars to [`DType`].
//!
//! No arithmetic lives here. Graph execution belongs to the inference engine.

mod dtype;
mod error;
mod shape;
mod tensor;

pub use dtype::DType;
pub use error::TensorError;
pub use shape::{Shape, DYNAMIC_DIM};
pub use tensor::{Element, Tensor};
