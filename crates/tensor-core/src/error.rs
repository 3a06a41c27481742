// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and access.

use crate::DType;

/// Errors that can occur when building or reading a tensor.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer size does not match the expected size for the given shape and dtype.
    #[error("shape mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The tensor was read back as an element type it does not hold.
    #[error("dtype mismatch: tensor holds {actual}, requested {requested}")]
    DTypeMismatch { actual: DType, requested: DType },
}
