// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Training records.
//!
//! A [`TrainingBatch`] accumulates labelled samples grouped by tensor name.
//! On disk it is grouped the same way:
//!
//! ```json
//! {
//!     "inputs": { "x": [[1.0, 2.0], [3.0, 4.0]] },
//!     "labels": { "y": [0, 1] }
//! }
//! ```
//!
//! Group order is first-use order and survives a round-trip.

use crate::{json, ModelError, Value};
use std::path::Path;

const DOCUMENT: &str = "training batch";

/// All samples recorded for one named tensor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedExample {
    pub name: String,
    /// One entry per sample, positionally aligned with the other groups.
    pub data: Vec<Value>,
}

impl NamedExample {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
        }
    }
}

/// Labelled training samples.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct TrainingBatch {
    #[serde(default, with = "named_examples")]
    pub inputs: Vec<NamedExample>,
    #[serde(default, with = "named_examples")]
    pub labels: Vec<NamedExample>,
}

impl TrainingBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one sample: `input` under `input_name` and `label` under
    /// `label_name`. Groups are created on first use.
    ///
    /// Sample counts across groups are not cross-checked.
    pub fn add_example(
        &mut self,
        input_name: &str,
        input: impl Into<Value>,
        label_name: &str,
        label: impl Into<Value>,
    ) {
        group_mut(&mut self.inputs, input_name).data.push(input.into());
        group_mut(&mut self.labels, label_name).data.push(label.into());
    }

    /// Returns the input group with the given name.
    pub fn input(&self, name: &str) -> Option<&NamedExample> {
        self.inputs.iter().find(|e| e.name == name)
    }

    /// Returns the label group with the given name.
    pub fn label(&self, name: &str) -> Option<&NamedExample> {
        self.labels.iter().find(|e| e.name == name)
    }

    /// A batch is empty when it has no input samples or no label samples.
    pub fn is_empty(&self) -> bool {
        let none = |groups: &[NamedExample]| groups.iter().all(|e| e.data.is_empty());
        none(&self.inputs) || none(&self.labels)
    }

    /// Number of samples in the largest input group.
    pub fn num_samples(&self) -> usize {
        self.inputs.iter().map(|e| e.data.len()).max().unwrap_or(0)
    }

    /// Drops every recorded sample.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.labels.clear();
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        json::to_pretty(self, DOCUMENT)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        json::from_str(json, DOCUMENT)
    }

    /// Writes the batch to `path`, creating parent directories.
    pub fn to_file(&self, path: &Path) -> Result<(), ModelError> {
        json::write_file(path, &self.to_json()?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        Self::from_json(&json::read_file(path)?)
    }
}

fn group_mut<'a>(groups: &'a mut Vec<NamedExample>, name: &str) -> &'a mut NamedExample {
    match groups.iter().position(|e| e.name == name) {
        Some(i) => &mut groups[i],
        None => {
            groups.push(NamedExample::new(name));
            let last = groups.len() - 1;
            &mut groups[last]
        }
    }
}

/// `Vec<NamedExample>` as a JSON object keyed by name, in vector order.
mod named_examples {
    use super::NamedExample;
    use crate::Value;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(groups: &[NamedExample], ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(groups.len()))?;
        for group in groups {
            map.serialize_entry(&group.name, &group.data)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<NamedExample>, D::Error> {
        de.deserialize_map(GroupsVisitor)
    }

    struct GroupsVisitor;

    impl<'de> Visitor<'de> for GroupsVisitor {
        type Value = Vec<NamedExample>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping tensor names to sample lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut groups: Vec<NamedExample> = Vec::new();
            while let Some((name, data)) = access.next_entry::<String, Vec<Value>>()? {
                if groups.iter().any(|g| g.name == name) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate example group '{name}'"
                    )));
                }
                groups.push(NamedExample { name, data });
            }
            Ok(groups)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> TrainingBatch {
        let mut b = TrainingBatch::new();
        b.add_example("zeta", vec![1.0, 2.0], "label", 0);
        b.add_example("alpha", vec![3.0, 4.0], "label", 1);
        b.add_example("zeta", vec![5.0, 6.0], "label", 1);
        b
    }

    #[test]
    fn test_add_example_groups_by_name() {
        let b = sample_batch();
        assert_eq!(b.inputs.len(), 2);
        assert_eq!(b.labels.len(), 1);
        assert_eq!(b.input("zeta").unwrap().data.len(), 2);
        assert_eq!(b.input("alpha").unwrap().data.len(), 1);
        assert_eq!(
            b.label("label").unwrap().data,
            vec![Value::Int(0), Value::Int(1), Value::Int(1)]
        );
        assert_eq!(b.num_samples(), 2);
    }

    #[test]
    fn test_empty() {
        let mut b = TrainingBatch::new();
        assert!(b.is_empty());
        b.add_example("x", 1, "y", 2);
        assert!(!b.is_empty());
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_group_order() {
        let b = sample_batch();
        let json = b.to_json().unwrap();
        assert!(json.find("\"zeta\"").unwrap() < json.find("\"alpha\"").unwrap());
        let back = TrainingBatch::from_json(&json).unwrap();
        assert_eq!(back, b);
        assert_eq!(back.inputs[0].name, "zeta");
    }

    #[test]
    fn test_roundtrip_nested_values() {
        let mut b = TrainingBatch::new();
        let image = Value::from(vec![Value::from([0, 255]), Value::from([128, 64])]);
        b.add_example("pixels", image, "class", "cat");
        b.add_example("pixels", Value::Null, "class", Value::from(true));
        let back = TrainingBatch::from_json(&b.to_json().unwrap()).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn test_wire_layout() {
        let json = r#"{ "inputs": { "x": [1, 2] }, "labels": { "y": [0.5, 1.5] } }"#;
        let b = TrainingBatch::from_json(json).unwrap();
        assert_eq!(b.input("x").unwrap().data, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(
            b.label("y").unwrap().data,
            vec![Value::Float(0.5), Value::Float(1.5)]
        );
    }

    #[test]
    fn test_labels_only_or_inputs_only_is_empty() {
        let b = TrainingBatch::from_json(r#"{ "inputs": { "x": [1] } }"#).unwrap();
        assert!(b.is_empty());
        let b = TrainingBatch::from_json(r#"{ "inputs": { "x": [1] }, "labels": { "y": [] } }"#)
            .unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let b = TrainingBatch::from_json("{}").unwrap();
        assert!(b.is_empty());
        assert!(b.labels.is_empty());
    }

    #[test]
    fn test_malformed() {
        assert!(TrainingBatch::from_json(r#"{ "inputs": [1, 2] }"#).is_err());
        assert!(TrainingBatch::from_json(r#"{ "inputs": { "x": 3 } }"#).is_err());
        assert!(matches!(
            TrainingBatch::from_json("not json"),
            Err(ModelError::Parse { .. })
        ));
    }
}
