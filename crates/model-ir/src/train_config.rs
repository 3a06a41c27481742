// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Training hyperparameters handed to the external trainer.

use crate::{json, ModelError};
use std::path::Path;

const DOCUMENT: &str = "training config";

/// Hyperparameters for one training run.
///
/// Missing keys take their default. Ranges are not checked; the trainer
/// owns that.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: u32,
    pub batch_size: u32,
    pub learning_rate: f64,
    pub shuffle: bool,
    /// Fraction of samples held out for validation.
    pub validation_split: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 32,
            learning_rate: 0.001,
            shuffle: true,
            validation_split: 0.0,
        }
    }
}

impl TrainingConfig {
    pub fn to_json(&self) -> Result<String, ModelError> {
        json::to_pretty(self, DOCUMENT)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        json::from_str(json, DOCUMENT)
    }

    pub fn to_file(&self, path: &Path) -> Result<(), ModelError> {
        json::write_file(path, &self.to_json()?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        Self::from_json(&json::read_file(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = TrainingConfig::default();
        assert_eq!(c.epochs, 10);
        assert_eq!(c.batch_size, 32);
        assert_eq!(c.learning_rate, 0.001);
        assert!(c.shuffle);
        assert_eq!(c.validation_split, 0.0);
    }

    #[test]
    fn test_roundtrip() {
        let c = TrainingConfig {
            epochs: 3,
            batch_size: 1,
            learning_rate: 0.1,
            shuffle: false,
            validation_split: 0.25,
        };
        assert_eq!(TrainingConfig::from_json(&c.to_json().unwrap()).unwrap(), c);
    }

    #[test]
    fn test_partial_document() {
        let c = TrainingConfig::from_json(r#"{ "epochs": 50 }"#).unwrap();
        assert_eq!(c.epochs, 50);
        assert_eq!(c.batch_size, 32);
        assert!(c.shuffle);
    }

    #[test]
    fn test_no_range_checks() {
        let c = TrainingConfig::from_json(r#"{ "validation_split": 3.5, "epochs": 0 }"#).unwrap();
        assert_eq!(c.validation_split, 3.5);
        assert_eq!(c.epochs, 0);
    }

    #[test]
    fn test_wrong_type() {
        assert!(matches!(
            TrainingConfig::from_json(r#"{ "shuffle": "yes" }"#),
            Err(ModelError::Parse { .. })
        ));
    }
}
