// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared JSON document helpers.

use crate::ModelError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Encodes a document as 4-space-indented JSON, the layout the Python
/// toolchain writes and reads.
pub(crate) fn to_pretty<T: Serialize>(
    value: &T,
    document: &'static str,
) -> Result<String, ModelError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut ser)
        .map_err(|source| ModelError::Encode { document, source })?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub(crate) fn from_str<T: DeserializeOwned>(
    json: &str,
    document: &'static str,
) -> Result<T, ModelError> {
    serde_json::from_str(json).map_err(|source| ModelError::Parse { document, source })
}

/// Writes `contents` to `path`, creating missing parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), ModelError> {
    let io_err = |source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

pub(crate) fn read_file(path: &Path) -> Result<String, ModelError> {
    std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}
