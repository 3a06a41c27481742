// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `forge export` command: write the descriptor and training batch side by side.

use model_ir::{ModelDescriptor, TrainingBatch};
use orchestrator::{ModelOrchestrator, ToolchainConfig};
use std::path::PathBuf;

pub fn execute(
    config: ToolchainConfig,
    descriptor: PathBuf,
    data: Option<PathBuf>,
    out: PathBuf,
) -> anyhow::Result<()> {
    super::banner("Exporter");

    let descriptor = ModelDescriptor::from_file(&descriptor)?;
    let mut model = ModelOrchestrator::from_descriptor(descriptor, config);
    if let Some(data) = data {
        model.set_training_batch(TrainingBatch::from_file(&data)?);
    }

    let (layout_path, data_path) = model.export_all(&out)?;
    println!("  Wrote {}", layout_path.display());
    println!("  Wrote {}", data_path.display());
    Ok(())
}
