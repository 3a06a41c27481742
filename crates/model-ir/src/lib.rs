// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-ir
//!
//! The documents exchanged with the external model toolchain, and the name
//! table that ties a compiled artifact back to the caller's vocabulary.
//!
//! - [`ModelDescriptor`]: declarative inputs, outputs and layer graph.
//! - [`Value`]: structured layer parameters and training samples.
//! - [`TrainingBatch`]: labelled samples grouped by tensor name.
//! - [`TrainingConfig`]: trainer hyperparameters.
//! - [`IoManifest`]: the compiler's logical → physical name listing.
//! - [`NameResolver`]: the resolution table loaded from a manifest.
//!
//! Every document serializes to 4-space-indented JSON and parses back to an
//! equal value.
//!
//! # Example
//! ```
//! use model_ir::{Domain, ModelDescriptor, Value};
//! use tensor_core::DType;
//!
//! let mut model = ModelDescriptor::new("simple_add");
//! model
//!     .add_input("x", DType::Float32, [-1], Domain::Data)
//!     .add_input("y", DType::Float32, [-1], Domain::Data)
//!     .add_output("add_result")
//!     .add_layer("Add", [
//!         ("input_names", Value::from(["x", "y"])),
//!         ("output_name", Value::from("add_result")),
//!     ]);
//!
//! let json = model.to_json().unwrap();
//! assert_eq!(ModelDescriptor::from_json(&json).unwrap(), model);
//! ```

mod batch;
mod descriptor;
mod error;
mod json;
mod manifest;
mod resolver;
mod train_config;
mod value;

pub use batch::{NamedExample, TrainingBatch};
pub use descriptor::{Domain, Input, Layer, ModelDescriptor, Output};
pub use error::ModelError;
pub use manifest::IoManifest;
pub use resolver::NameResolver;
pub use train_config::TrainingConfig;
pub use value::Value;
