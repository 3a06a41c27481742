// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `forge compile` command: build an artifact from a descriptor file.

use model_ir::ModelDescriptor;
use orchestrator::{ModelOrchestrator, ToolchainConfig};
use std::path::PathBuf;

pub fn execute(config: ToolchainConfig, descriptor: PathBuf) -> anyhow::Result<()> {
    super::banner("Model Compiler");

    let descriptor = ModelDescriptor::from_file(&descriptor).map_err(|e| {
        anyhow::anyhow!("failed to read descriptor '{}': {e}", descriptor.display())
    })?;
    println!("  {}", descriptor.summary());
    println!("  Compiler: {}", config.compiler);
    println!();

    let mut model = ModelOrchestrator::from_descriptor(descriptor, config);
    model.compile()?;

    println!("  Artifact: {}", model.layout().artifact_dir().display());
    println!();
    let logical: Vec<String> = model
        .descriptor()
        .outputs
        .iter()
        .map(|o| o.name.clone())
        .collect();
    super::print_name_table(model.resolver(), &logical);
    Ok(())
}
