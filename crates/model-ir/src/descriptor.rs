// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Declarative model descriptors.
//!
//! A [`ModelDescriptor`] is what the caller builds up before compilation and
//! what the external model compiler reads.
//!
//! # Format
//! ```json
//! {
//!     "model_name": "simple_add",
//!     "inputs": [
//!         { "name": "x", "dtype": "float32", "shape": [-1], "domain": "data" },
//!         { "name": "y", "dtype": "float32", "shape": [-1], "domain": "data" }
//!     ],
//!     "outputs": [ { "name": "add_result" } ],
//!     "layers": [
//!         {
//!             "type": "Add",
//!             "params": { "input_names": ["x", "y"], "output_name": "add_result" }
//!         }
//!     ]
//! }
//! ```
//!
//! Layers reference earlier inputs or layers through `input_name` /
//! `input_names` and publish their own tensor as `output_name`. Those links
//! are the compiler's business and are not followed here.

use crate::{json, ModelError, Value};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use tensor_core::DType;

const DOCUMENT: &str = "model descriptor";

/// What kind of data an input carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Generic numeric data.
    #[default]
    Data,
    /// Image pixels, usually produced by an image preprocessor.
    Image,
}

/// A declared model input.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Input {
    /// Logical input name, unique within the descriptor.
    pub name: String,
    /// Element type.
    pub dtype: DType,
    /// Declared shape; `-1` marks a dynamic dimension.
    pub shape: Vec<i64>,
    /// Older descriptors spell this key `input_type`.
    #[serde(default, alias = "input_type")]
    pub domain: Domain,
}

/// A declared logical output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Output {
    /// Logical output name, unique within the descriptor.
    pub name: String,
}

/// One node of the layer graph.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Layer kind, e.g. `"Dense"`, `"Conv2D"`, `"Add"`.
    #[serde(rename = "type")]
    pub layer_type: String,
    /// Compiler-interpreted parameters.
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
}

impl Layer {
    /// Returns the `output_name` parameter, if set to a string.
    pub fn output_name(&self) -> Option<&str> {
        self.params.get("output_name").and_then(Value::as_str)
    }

    /// Returns the tensors this layer consumes, from `input_name` or
    /// `input_names`.
    pub fn input_names(&self) -> Vec<&str> {
        if let Some(single) = self.params.get("input_name").and_then(Value::as_str) {
            return vec![single];
        }
        self.params
            .get("input_names")
            .and_then(Value::as_list)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// The full model description handed to the model compiler.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelDescriptor {
    /// Model name; also names the artifact directory.
    pub model_name: String,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub outputs: Vec<Output>,
    /// Declaration order is preserved and passed through to the compiler.
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl ModelDescriptor {
    /// Creates an empty descriptor.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Appends an input declaration.
    pub fn add_input(
        &mut self,
        name: impl Into<String>,
        dtype: DType,
        shape: impl Into<Vec<i64>>,
        domain: Domain,
    ) -> &mut Self {
        self.inputs.push(Input {
            name: name.into(),
            dtype,
            shape: shape.into(),
            domain,
        });
        self
    }

    /// Appends an output declaration.
    pub fn add_output(&mut self, name: impl Into<String>) -> &mut Self {
        self.outputs.push(Output { name: name.into() });
        self
    }

    /// Appends a layer with the given parameters.
    ///
    /// # Example
    /// ```
    /// use model_ir::{ModelDescriptor, Value};
    ///
    /// let mut d = ModelDescriptor::new("linear");
    /// d.add_layer("Dense", [
    ///     ("input_name", Value::from("flat_input")),
    ///     ("units", Value::from(16)),
    ///     ("output_name", Value::from("dense_1")),
    /// ]);
    /// assert_eq!(d.layers[0].output_name(), Some("dense_1"));
    /// ```
    pub fn add_layer<K, V>(
        &mut self,
        layer_type: impl Into<String>,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.layers.push(Layer {
            layer_type: layer_type.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        self
    }

    /// Looks up an input by logical name.
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// Returns the position of a declared output.
    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|o| o.name == name)
    }

    /// Checks the structural invariants that do not need the compiler:
    /// - input names are unique,
    /// - output names are unique,
    /// - every input shape is non-empty.
    ///
    /// Layer connectivity is not checked. Compiling does not call this; the
    /// model compiler is the authority on what it accepts.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for input in &self.inputs {
            if !seen.insert(input.name.as_str()) {
                return Err(ModelError::InvalidDescriptor(format!(
                    "duplicate input name '{}'",
                    input.name
                )));
            }
            if input.shape.is_empty() {
                return Err(ModelError::InvalidDescriptor(format!(
                    "input '{}' has an empty shape",
                    input.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for output in &self.outputs {
            if !seen.insert(output.name.as_str()) {
                return Err(ModelError::InvalidDescriptor(format!(
                    "duplicate output name '{}'",
                    output.name
                )));
            }
        }

        Ok(())
    }

    /// Serializes to pretty-printed JSON with a fixed key order.
    pub fn to_json(&self) -> Result<String, ModelError> {
        json::to_pretty(self, DOCUMENT)
    }

    /// Parses a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        json::from_str(json, DOCUMENT)
    }

    /// Writes the descriptor to `path`, creating parent directories.
    pub fn to_file(&self, path: &Path) -> Result<(), ModelError> {
        json::write_file(path, &self.to_json()?)
    }

    /// Reads a descriptor from `path`.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        Self::from_json(&json::read_file(path)?)
    }

    /// Returns a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "Model '{}': {} inputs, {} outputs, {} layers",
            self.model_name,
            self.inputs.len(),
            self.outputs.len(),
            self.layers.len(),
        )
    }
}

impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for input in &self.inputs {
            writeln!(
                f,
                "  input  {} : {} {:?} ({:?})",
                input.name, input.dtype, input.shape, input.domain
            )?;
        }
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(
                f,
                "  [{i}] {} {:?} -> {}",
                layer.layer_type,
                layer.input_names(),
                layer.output_name().unwrap_or("?"),
            )?;
        }
        for output in &self.outputs {
            writeln!(f, "  output {}", output.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_add() -> ModelDescriptor {
        let mut d = ModelDescriptor::new("simple_add");
        d.add_input("x", DType::Float32, [-1], Domain::Data)
            .add_input("y", DType::Float32, [-1], Domain::Data)
            .add_output("add_result")
            .add_layer(
                "Add",
                [
                    ("input_names", Value::from(["x", "y"])),
                    ("output_name", Value::from("add_result")),
                ],
            );
        d
    }

    fn mnist_like() -> ModelDescriptor {
        let mut d = ModelDescriptor::new("simple_mnist");
        d.add_input("input", DType::Float32, [-1, 28, 28, 1], Domain::Image)
            .add_output("class_probs")
            .add_layer(
                "Conv2D",
                [
                    ("input_name", Value::from("input")),
                    ("filters", Value::from(64)),
                    ("kernel_size", Value::from([3, 3])),
                    ("output_name", Value::from("conv2d_1")),
                ],
            )
            .add_layer(
                "Dropout",
                [
                    ("input_name", Value::from("conv2d_1")),
                    ("rate", Value::from(0.25)),
                    ("output_name", Value::from("drop")),
                ],
            )
            .add_layer(
                "Dense",
                [
                    ("input_name", Value::from("drop")),
                    ("units", Value::from(6)),
                    ("activation", Value::from("softmax")),
                    ("output_name", Value::from("class_probs")),
                ],
            );
        d
    }

    #[test]
    fn test_serde_roundtrip() {
        for d in [simple_add(), mnist_like(), ModelDescriptor::new("empty")] {
            let json = d.to_json().unwrap();
            let back = ModelDescriptor::from_json(&json).unwrap();
            assert_eq!(back, d);
        }
    }

    #[test]
    fn test_non_finite_param_fails_to_encode() {
        let mut d = ModelDescriptor::new("m");
        d.add_layer("Dropout", [("rate", Value::from(f64::NAN))]);
        assert!(matches!(d.to_json(), Err(ModelError::Encode { .. })));
    }

    #[test]
    fn test_canonical_layout() {
        let json = simple_add().to_json().unwrap();
        let model = json.find("\"model_name\"").unwrap();
        let inputs = json.find("\"inputs\"").unwrap();
        let outputs = json.find("\"outputs\"").unwrap();
        let layers = json.find("\"layers\"").unwrap();
        assert!(model < inputs && inputs < outputs && outputs < layers);
        assert!(json.contains("\"dtype\": \"float32\""));
        assert!(json.contains("\"domain\": \"data\""));
        assert!(json.contains("\"type\": \"Add\""));
        // Four-space indentation.
        assert!(json.contains("\n    \"model_name\""));
    }

    #[test]
    fn test_missing_domain_defaults_to_data() {
        let json = r#"{
            "model_name": "m",
            "inputs": [{ "name": "x", "dtype": "int64", "shape": [-1, 3] }],
            "outputs": [{ "name": "y" }],
            "layers": []
        }"#;
        let d = ModelDescriptor::from_json(json).unwrap();
        assert_eq!(d.inputs[0].domain, Domain::Data);
        assert_eq!(d.inputs[0].dtype, DType::Int64);
    }

    #[test]
    fn test_legacy_input_type_key() {
        let json = r#"{
            "model_name": "m",
            "inputs": [{ "name": "img", "dtype": "uint8", "shape": [-1, 8, 8, 3], "input_type": "image" }]
        }"#;
        let d = ModelDescriptor::from_json(json).unwrap();
        assert_eq!(d.inputs[0].domain, Domain::Image);
        assert!(d.outputs.is_empty());
        assert!(d.layers.is_empty());
    }

    #[test]
    fn test_missing_model_name() {
        let err = ModelDescriptor::from_json(r#"{ "inputs": [] }"#).unwrap_err();
        assert!(matches!(err, ModelError::Parse { .. }));
    }

    #[test]
    fn test_missing_input_fields() {
        for input in [
            r#"{ "dtype": "float32", "shape": [1] }"#,
            r#"{ "name": "x", "shape": [1] }"#,
            r#"{ "name": "x", "dtype": "float32" }"#,
        ] {
            let json = format!(r#"{{ "model_name": "m", "inputs": [{input}] }}"#);
            assert!(
                matches!(ModelDescriptor::from_json(&json), Err(ModelError::Parse { .. })),
                "accepted {input}"
            );
        }
    }

    #[test]
    fn test_unknown_enum_strings() {
        let bad_dtype = r#"{ "model_name": "m",
            "inputs": [{ "name": "x", "dtype": "f32", "shape": [1] }] }"#;
        let bad_domain = r#"{ "model_name": "m",
            "inputs": [{ "name": "x", "dtype": "float32", "shape": [1], "domain": "audio" }] }"#;
        assert!(ModelDescriptor::from_json(bad_dtype).is_err());
        assert!(ModelDescriptor::from_json(bad_domain).is_err());
    }

    #[test]
    fn test_validate_ok() {
        simple_add().validate().unwrap();
        mnist_like().validate().unwrap();
    }

    #[test]
    fn test_validate_duplicate_input() {
        let mut d = simple_add();
        d.add_input("x", DType::Float32, [-1], Domain::Data);
        assert!(matches!(d.validate(), Err(ModelError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_validate_duplicate_output() {
        let mut d = simple_add();
        d.add_output("add_result");
        assert!(matches!(d.validate(), Err(ModelError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_validate_empty_shape() {
        let mut d = ModelDescriptor::new("m");
        d.add_input("x", DType::Float32, Vec::<i64>::new(), Domain::Data);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_layer_links() {
        let d = simple_add();
        assert_eq!(d.layers[0].input_names(), vec!["x", "y"]);
        assert_eq!(d.layers[0].output_name(), Some("add_result"));
        let m = mnist_like();
        assert_eq!(m.layers[1].input_names(), vec!["conv2d_1"]);
    }

    #[test]
    fn test_lookup() {
        let d = simple_add();
        assert_eq!(d.input("y").map(|i| i.dtype), Some(DType::Float32));
        assert!(d.input("z").is_none());
        assert_eq!(d.output_index("add_result"), Some(0));
        assert_eq!(d.output_index("nope"), None);
    }

    #[test]
    fn test_summary_and_display() {
        let d = mnist_like();
        assert_eq!(d.summary(), "Model 'simple_mnist': 1 inputs, 1 outputs, 3 layers");
        let shown = d.to_string();
        assert!(shown.contains("Conv2D"));
        assert!(shown.contains("-> class_probs"));
    }
}
