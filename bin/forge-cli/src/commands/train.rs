// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `forge train` command: fit an existing artifact to a recorded batch.

use model_ir::{TrainingBatch, TrainingConfig};
use orchestrator::ToolchainConfig;
use std::path::PathBuf;

/// Hyperparameter flags that override the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub epochs: Option<u32>,
    pub batch_size: Option<u32>,
    pub learning_rate: Option<f64>,
    pub validation_split: Option<f64>,
    pub no_shuffle: bool,
}

impl Overrides {
    fn apply(&self, config: &mut TrainingConfig) {
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(split) = self.validation_split {
            config.validation_split = split;
        }
        if self.no_shuffle {
            config.shuffle = false;
        }
    }
}

pub fn execute(
    config: ToolchainConfig,
    artifact: PathBuf,
    data: PathBuf,
    train_config: Option<PathBuf>,
    overrides: Overrides,
) -> anyhow::Result<()> {
    super::banner("Trainer");

    let batch = TrainingBatch::from_file(&data)
        .map_err(|e| anyhow::anyhow!("failed to read training data '{}': {e}", data.display()))?;
    let mut hyper = match &train_config {
        Some(path) => TrainingConfig::from_file(path)?,
        None => TrainingConfig::default(),
    };
    overrides.apply(&mut hyper);

    println!("  Artifact: {}", artifact.display());
    println!("  Samples:  {}", batch.num_samples());
    println!(
        "  Config:   epochs={} batch_size={} lr={} shuffle={} validation_split={}",
        hyper.epochs, hyper.batch_size, hyper.learning_rate, hyper.shuffle, hyper.validation_split,
    );
    println!("  Trainer:  {}", config.trainer);
    println!();

    let mut model = super::load::load(config, &artifact)?;
    model.set_training_batch(batch);
    model.train(&hyper)?;

    println!("  Done. Model is {}.", model.state());
    Ok(())
}
