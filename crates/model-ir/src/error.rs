// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model descriptions, training records and name resolution.

use std::path::PathBuf;

/// Errors that can occur when working with model documents.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A document could not be read from or written to disk.
    #[error("i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor, training batch or training config document is malformed.
    #[error("failed to parse {document}: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be encoded as JSON.
    #[error("failed to encode {document}: {source}")]
    Encode {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The IO-name manifest emitted by the model compiler is missing or malformed.
    #[error("invalid IO-name manifest: {0}")]
    Manifest(String),

    /// A logical input name has no entry in the resolution table.
    #[error("unknown input '{name}'")]
    UnknownInput { name: String },

    /// A logical output name is not declared or has no physical counterpart.
    #[error("unknown output '{name}'")]
    UnknownOutput { name: String },

    /// The descriptor breaks a structural invariant (duplicate names, empty shape).
    #[error("invalid model descriptor: {0}")]
    InvalidDescriptor(String),
}
