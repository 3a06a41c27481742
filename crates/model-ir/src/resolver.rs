// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Logical-to-physical tensor name resolution.

use crate::{IoManifest, ModelError};
use std::path::Path;

/// The name resolution table for one compiled artifact.
///
/// Callers address tensors by the names they chose in the descriptor
/// (`"x"`); the compiled graph exposes generated node names
/// (`"serving_default_x:0"`). The table is replaced wholesale on every
/// successful load and is never partially updated.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    table: Option<IoManifest>,
}

impl NameResolver {
    /// Creates an empty resolver. Nothing resolves until a manifest is loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the table with `manifest`.
    pub fn load(&mut self, manifest: IoManifest) {
        tracing::debug!(
            "name table loaded: {} inputs, {} outputs",
            manifest.inputs.len(),
            manifest.outputs.len()
        );
        self.table = Some(manifest);
    }

    /// Parses `json` and replaces the table. On error the previous table is kept.
    pub fn load_json(&mut self, json: &str) -> Result<(), ModelError> {
        let manifest = IoManifest::from_json(json)?;
        self.load(manifest);
        Ok(())
    }

    /// Reads a manifest file and replaces the table. On error the previous
    /// table is kept.
    pub fn load_file(&mut self, path: &Path) -> Result<(), ModelError> {
        let manifest = IoManifest::from_file(path)?;
        self.load(manifest);
        Ok(())
    }

    /// Maps a logical input name to its physical node name.
    pub fn resolve(&self, logical: &str) -> Result<&str, ModelError> {
        self.table
            .as_ref()
            .and_then(|t| t.inputs.get(logical))
            .map(String::as_str)
            .ok_or_else(|| ModelError::UnknownInput {
                name: logical.to_string(),
            })
    }

    /// Physical output names in declaration order. Empty before any load.
    pub fn physical_outputs(&self) -> &[String] {
        self.table.as_ref().map_or(&[], |t| t.outputs.as_slice())
    }

    /// Returns `true` once a manifest has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// The current table, if any.
    pub fn manifest(&self) -> Option<&IoManifest> {
        self.table.as_ref()
    }
}
