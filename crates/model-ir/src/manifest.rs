// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! IO-name manifest parsing.
//!
//! The model compiler writes a manifest next to the artifact that maps the
//! caller's logical input names onto the graph's physical node names, and
//! lists the physical outputs in declaration order.
//!
//! # Format
//! ```json
//! {
//!   "inputs":  { "x": "serving_default_x:0", "y": "serving_default_y:0" },
//!   "outputs": { "0": "StatefulPartitionedCall:0" }
//! }
//! ```
//!
//! `outputs` may also be a plain list. Object keys are ordinals and are
//! sorted numerically, so `"10"` comes after `"2"`.

use crate::{json, ModelError};
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed IO-name manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoManifest {
    /// Logical input name → physical node name.
    pub inputs: BTreeMap<String, String>,
    /// Physical output names, aligned with the declared outputs.
    pub outputs: Vec<String>,
}

#[derive(serde::Deserialize)]
struct RawManifest {
    inputs: BTreeMap<String, String>,
    outputs: RawOutputs,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawOutputs {
    List(Vec<String>),
    Ordinal(BTreeMap<String, String>),
}

impl IoManifest {
    /// Parses a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let raw: RawManifest =
            serde_json::from_str(json).map_err(|e| ModelError::Manifest(e.to_string()))?;

        let outputs = match raw.outputs {
            RawOutputs::List(list) => list,
            RawOutputs::Ordinal(map) => {
                let mut ordered = Vec::with_capacity(map.len());
                for (key, physical) in map {
                    let ordinal: usize = key.trim().parse().map_err(|_| {
                        ModelError::Manifest(format!("output key '{key}' is not an ordinal"))
                    })?;
                    ordered.push((ordinal, physical));
                }
                ordered.sort_by_key(|(ordinal, _)| *ordinal);
                if ordered.windows(2).any(|w| w[0].0 == w[1].0) {
                    return Err(ModelError::Manifest("duplicate output ordinal".into()));
                }
                ordered.into_iter().map(|(_, physical)| physical).collect()
            }
        };

        Ok(Self {
            inputs: raw.inputs,
            outputs,
        })
    }

    /// Reads and parses a manifest file. A missing file is a manifest error.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ModelError::Manifest(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Serializes back to the object form with ordinal keys.
    pub fn to_json(&self) -> Result<String, ModelError> {
        let outputs: BTreeMap<usize, &str> = self
            .outputs
            .iter()
            .enumerate()
            .map(|(i, name)| (i, name.as_str()))
            .collect();
        let doc = serde_json::json!({ "inputs": self.inputs, "outputs": outputs });
        json::to_pretty(&doc, "IO-name manifest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_outputs() {
        let m = IoManifest::from_json(
            r#"{ "inputs": { "x": "serving_default_x:0" },
                 "outputs": { "1": "b:0", "0": "a:0" } }"#,
        )
        .unwrap();
        assert_eq!(m.inputs["x"], "serving_default_x:0");
        assert_eq!(m.outputs, vec!["a:0", "b:0"]);
    }

    #[test]
    fn test_list_outputs() {
        let m = IoManifest::from_json(
            r#"{ "inputs": {}, "outputs": ["StatefulPartitionedCall:0", "StatefulPartitionedCall:1"] }"#,
        )
        .unwrap();
        assert!(m.inputs.is_empty());
        assert_eq!(m.outputs.len(), 2);
        assert_eq!(m.outputs[1], "StatefulPartitionedCall:1");
    }

    #[test]
    fn test_numeric_key_order() {
        let outputs: Vec<String> = (0..12).map(|i| format!("\"{i}\": \"out{i}\"")).collect();
        let json = format!(r#"{{ "inputs": {{}}, "outputs": {{ {} }} }}"#, outputs.join(", "));
        let m = IoManifest::from_json(&json).unwrap();
        let expected: Vec<String> = (0..12).map(|i| format!("out{i}")).collect();
        assert_eq!(m.outputs, expected);
    }

    #[test]
    fn test_non_ordinal_key() {
        let err = IoManifest::from_json(r#"{ "inputs": {}, "outputs": { "first": "a:0" } }"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::Manifest(_)));
    }

    #[test]
    fn test_malformed() {
        for json in [
            "",
            "{",
            r#"{ "outputs": [] }"#,
            r#"{ "inputs": {} }"#,
            r#"{ "inputs": { "x": 3 }, "outputs": [] }"#,
            r#"{ "inputs": [], "outputs": [] }"#,
        ] {
            assert!(
                matches!(IoManifest::from_json(json), Err(ModelError::Manifest(_))),
                "accepted {json:?}"
            );
        }
    }

    #[test]
    fn test_missing_file() {
        let err = IoManifest::from_file(Path::new("/nonexistent/io_names.json")).unwrap_err();
        assert!(matches!(err, ModelError::Manifest(_)));
    }

    #[test]
    fn test_to_json_roundtrip() {
        let mut m = IoManifest::default();
        m.inputs.insert("x".into(), "serving_default_x:0".into());
        m.outputs = vec!["a:0".into(), "b:0".into()];
        let json = m.to_json().unwrap();
        assert!(json.contains("\n    \"inputs\""));
        assert!(json.contains("\n        \"0\": \"a:0\""));
        let back = IoManifest::from_json(&json).unwrap();
        assert_eq!(back, m);
    }
}
