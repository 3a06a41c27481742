// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The inference engine seam.

use crate::RuntimeError;
use std::path::Path;
use tensor_core::Tensor;

/// Executes a compiled artifact.
///
/// Implementations wrap a tensor runtime (TensorFlow, ONNX Runtime, ...).
/// Everything here speaks physical node names; the orchestrator has
/// already translated the caller's logical names.
pub trait InferenceBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Runs the artifact at `artifact` on `inputs` and returns one tensor per
    /// entry of `outputs`, in the same order.
    fn run(
        &self,
        artifact: &Path,
        inputs: &[(String, Tensor)],
        outputs: &[String],
    ) -> Result<Vec<Tensor>, RuntimeError>;
}
