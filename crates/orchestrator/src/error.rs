// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model orchestration.

use crate::ToolKind;
use std::path::PathBuf;

/// Errors that can occur while compiling, training or running a model.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A document, manifest or name lookup failed.
    #[error("model error: {0}")]
    Model(#[from] model_ir::ModelError),

    /// An external tool ran and exited unsuccessfully.
    #[error("{tool} failed with {}", exit_description(.code))]
    SubprocessFailed { tool: ToolKind, code: Option<i32> },

    /// An external tool could not be started.
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: ToolKind,
        #[source]
        source: std::io::Error,
    },

    /// Training was requested with no recorded samples.
    #[error("no training data has been recorded")]
    NoData,

    /// The operation needs a compiled or loaded artifact.
    #[error("model has not been compiled or loaded")]
    NotCompiled,

    /// Inference could not be carried out.
    #[error("run failed: {0}")]
    RunFailed(String),

    /// The artifact path given to load does not exist.
    #[error("artifact not found at '{0}'")]
    ArtifactMissing(PathBuf),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file-system operation outside the model documents failed.
    #[error("i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl RuntimeError {
    /// The exit code carried by a [`RuntimeError::SubprocessFailed`].
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RuntimeError::SubprocessFailed { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subprocess_message() {
        let err = RuntimeError::SubprocessFailed {
            tool: ToolKind::Trainer,
            code: Some(2),
        };
        assert_eq!(err.to_string(), "trainer failed with exit code 2");
        assert_eq!(err.exit_code(), Some(2));

        let killed = RuntimeError::SubprocessFailed {
            tool: ToolKind::Compiler,
            code: None,
        };
        assert!(killed.to_string().contains("signal"));
    }

    #[test]
    fn test_model_error_conversion() {
        let err: RuntimeError = model_ir::ModelError::UnknownInput { name: "x".into() }.into();
        assert!(matches!(err, RuntimeError::Model(_)));
        assert_eq!(err.exit_code(), None);
    }
}
